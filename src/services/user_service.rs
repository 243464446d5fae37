//! Domain service for user profiles and per-user statistics.

use crate::domain::{AuthIdentity, DomainError};
use crate::models::{ReviewWithBook, TopUser, UpdateProfileInput, UserProfile, UserStats};

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserProfile>, DomainError>;

    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if no user has this id.
    async fn get_user(&self, id: i32) -> Result<UserProfile, DomainError>;

    /// Looks up by exact email after trimming.
    async fn get_user_by_email(&self, email: &str) -> Result<UserProfile, DomainError>;

    /// Substring match on name or email.
    async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>, DomainError>;

    async fn user_stats(&self, id: i32) -> Result<UserStats, DomainError>;

    async fn top_users(&self, limit: usize) -> Result<Vec<TopUser>, DomainError>;

    /// The caller's reviews with their books, newest first.
    async fn user_reviews(&self, user_id: i32) -> Result<Vec<ReviewWithBook>, DomainError>;

    /// Applies a profile change for the caller.
    ///
    /// A new password is only accepted together with the correct current one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for bad input or a wrong current
    /// password, and [`DomainError::Conflict`] if the email or name belongs to
    /// someone else.
    async fn update_profile(
        &self,
        identity: &AuthIdentity,
        input: UpdateProfileInput,
    ) -> Result<UserProfile, DomainError>;

    /// Deletes the caller's account and all of their reviews after
    /// re-checking the password.
    async fn delete_account(
        &self,
        identity: &AuthIdentity,
        password: &str,
    ) -> Result<bool, DomainError>;
}
