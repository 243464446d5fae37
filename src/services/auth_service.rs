//! Domain service for registration and login.
//!
//! Issues identity tokens on success; the GraphQL layer never sees password
//! hashes.

use crate::domain::DomainError;
use crate::models::{AuthPayload, LoginInput, RegisterInput, UserProfile};

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and returns a token for it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for malformed input and
    /// [`DomainError::Conflict`] when the email or name is already in use.
    async fn register(&self, input: RegisterInput) -> Result<AuthPayload, DomainError>;

    /// Verifies credentials and returns a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] for an unknown email and for
    /// a wrong password alike.
    async fn login(&self, input: LoginInput) -> Result<AuthPayload, DomainError>;

    async fn get_user_by_id(&self, id: i32) -> Result<Option<UserProfile>, DomainError>;

    /// Like [`Self::get_user_by_id`] but a missing user is an error.
    async fn validate_user(&self, id: i32) -> Result<UserProfile, DomainError>;
}
