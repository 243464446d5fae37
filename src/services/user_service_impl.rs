//! `SeaORM` implementation of the `UserService` trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::{Store, UserChanges};
use crate::domain::{AuthIdentity, DomainError};
use crate::models::{Review, ReviewWithBook, TopUser, UpdateProfileInput, UserProfile, UserStats};
use crate::services::auth_service_impl::user_conflict;
use crate::services::password::{self, CredentialHasher};
use crate::services::stats;
use crate::services::user_service::UserService;

const EMAIL_TAKEN: &str = "Email is already taken";
const NAME_TAKEN: &str = "Name is already taken";

pub struct SeaOrmUserService {
    store: Store,
    hasher: Arc<dyn CredentialHasher>,
}

impl SeaOrmUserService {
    #[must_use]
    pub fn new(store: Store, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    async fn credentials(&self, id: i32) -> Result<(UserProfile, String), DomainError> {
        self.store
            .get_user_credentials(id)
            .await?
            .ok_or(DomainError::NotFound("User"))
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError> {
        Ok(self.store.list_users().await?)
    }

    async fn get_user(&self, id: i32) -> Result<UserProfile, DomainError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(DomainError::NotFound("User"))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<UserProfile, DomainError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("Email is required"));
        }

        self.store
            .get_user_by_email(email)
            .await?
            .ok_or(DomainError::NotFound("User"))
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("Search query is required"));
        }

        Ok(self.store.search_users(query).await?)
    }

    async fn user_stats(&self, id: i32) -> Result<UserStats, DomainError> {
        let user = self.get_user(id).await?;
        let reviews = self.store.list_reviews_with_books_for_user(id).await?;
        Ok(stats::user_stats(&user, &reviews))
    }

    async fn top_users(&self, limit: usize) -> Result<Vec<TopUser>, DomainError> {
        let users = self.store.list_users().await?;

        let mut by_user: HashMap<i32, Vec<Review>> = HashMap::new();
        for review in self.store.list_reviews().await? {
            by_user.entry(review.user_id).or_default().push(review);
        }

        let users = users
            .into_iter()
            .map(|user| {
                let reviews = by_user.remove(&user.id).unwrap_or_default();
                (user, reviews)
            })
            .collect();

        Ok(stats::top_users(users, limit))
    }

    async fn user_reviews(&self, user_id: i32) -> Result<Vec<ReviewWithBook>, DomainError> {
        Ok(self.store.list_reviews_with_books_for_user(user_id).await?)
    }

    async fn update_profile(
        &self,
        identity: &AuthIdentity,
        input: UpdateProfileInput,
    ) -> Result<UserProfile, DomainError> {
        let input = input.normalized()?;
        let (user, current_hash) = self.credentials(identity.id).await?;

        if let Some(email) = &input.email
            && *email != user.email
            && self.store.email_taken_by_other(email, user.id).await?
        {
            return Err(DomainError::conflict(EMAIL_TAKEN));
        }

        if let Some(name) = &input.name
            && *name != user.name
            && self.store.name_taken_by_other(name, user.id).await?
        {
            return Err(DomainError::conflict(NAME_TAKEN));
        }

        let password_hash = match input.new_password {
            Some(new_password) => {
                let Some(current) = input.current_password.filter(|p| !p.is_empty()) else {
                    return Err(DomainError::validation(
                        "Current password is required to set a new password",
                    ));
                };

                let valid =
                    password::verify_password(self.hasher.clone(), current, current_hash).await?;
                if !valid {
                    return Err(DomainError::validation("Current password is incorrect"));
                }

                Some(password::hash_password(self.hasher.clone(), new_password).await?)
            }
            None => None,
        };

        let password_changed = password_hash.is_some();
        let changes = UserChanges {
            name: input.name,
            email: input.email,
            password_hash,
        };

        let updated = self
            .store
            .update_user(user.id, changes)
            .await
            .map_err(|e| user_conflict(e, EMAIL_TAKEN, NAME_TAKEN))?
            .ok_or(DomainError::NotFound("User"))?;

        info!(user_id = updated.id, password_changed, "Profile updated");

        Ok(updated)
    }

    async fn delete_account(
        &self,
        identity: &AuthIdentity,
        password: &str,
    ) -> Result<bool, DomainError> {
        if password.is_empty() {
            return Err(DomainError::validation(
                "Password is required to delete account",
            ));
        }

        let (user, hash) = self.credentials(identity.id).await?;

        let valid =
            password::verify_password(self.hasher.clone(), password.to_string(), hash).await?;
        if !valid {
            return Err(DomainError::validation("Invalid password"));
        }

        let deleted = self.store.delete_user_with_reviews(user.id).await?;
        if !deleted {
            return Err(DomainError::NotFound("User"));
        }

        info!(user_id = user.id, "Account deleted");
        Ok(true)
    }
}
