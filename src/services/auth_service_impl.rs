//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::error::unique_violation;
use crate::domain::{AuthIdentity, DomainError};
use crate::models::{AuthPayload, LoginInput, RegisterInput, UserProfile};
use crate::services::auth_service::AuthService;
use crate::services::password::{self, CredentialHasher};
use crate::services::token::TokenService;

pub const EMAIL_EXISTS: &str = "User with this email already exists";
pub const NAME_EXISTS: &str = "User with this name already exists";

pub struct SeaOrmAuthService {
    store: Store,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<TokenService>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, hasher: Arc<dyn CredentialHasher>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    fn payload_for(&self, user: UserProfile) -> Result<AuthPayload, DomainError> {
        let identity = AuthIdentity::new(user.id, user.email.clone(), user.name.clone());
        let token = self.tokens.issue(&identity)?;
        Ok(AuthPayload { token, user })
    }
}

/// Maps a unique-index rejection on `users` to the matching conflict message.
pub(crate) fn user_conflict(
    err: anyhow::Error,
    email_msg: &'static str,
    name_msg: &'static str,
) -> DomainError {
    match unique_violation(&err) {
        Some(msg) if msg.contains("users.name") => DomainError::conflict(name_msg),
        Some(_) => DomainError::conflict(email_msg),
        None => err.into(),
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, input: RegisterInput) -> Result<AuthPayload, DomainError> {
        input.validate()?;

        if let Some(existing) = self
            .store
            .find_user_by_email_or_name(&input.email, &input.name)
            .await?
        {
            if existing.email == input.email {
                return Err(DomainError::conflict(EMAIL_EXISTS));
            }
            return Err(DomainError::conflict(NAME_EXISTS));
        }

        let password_hash = password::hash_password(self.hasher.clone(), input.password).await?;

        let user = self
            .store
            .create_user(&input.email, &input.name, &password_hash)
            .await
            .map_err(|e| user_conflict(e, EMAIL_EXISTS, NAME_EXISTS))?;

        info!(user_id = user.id, name = %user.name, "User registered");

        self.payload_for(user)
    }

    async fn login(&self, input: LoginInput) -> Result<AuthPayload, DomainError> {
        input.validate()?;

        let Some((user, password_hash)) = self
            .store
            .get_user_credentials_by_email(&input.email)
            .await?
        else {
            return Err(DomainError::InvalidCredentials);
        };

        let valid =
            password::verify_password(self.hasher.clone(), input.password, password_hash).await?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        self.payload_for(user)
    }

    async fn get_user_by_id(&self, id: i32) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.store.get_user(id).await?)
    }

    async fn validate_user(&self, id: i32) -> Result<UserProfile, DomainError> {
        self.get_user_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("User"))
    }
}
