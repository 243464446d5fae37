//! Domain service for reviews.
//!
//! Mutations are owner-only. A review that does not exist and a review owned
//! by someone else produce the same error, so callers cannot probe for ids.

use crate::domain::{AuthIdentity, DomainError};
use crate::models::{CreateReviewInput, Review, UpdateReviewInput};

#[async_trait::async_trait]
pub trait ReviewService: Send + Sync {
    async fn list_reviews(&self) -> Result<Vec<Review>, DomainError>;

    /// A missing review is `None`, not an error.
    async fn get_review(&self, id: i32) -> Result<Option<Review>, DomainError>;

    async fn reviews_for_book(&self, book_id: i32) -> Result<Vec<Review>, DomainError>;

    async fn reviews_for_user(&self, user_id: i32) -> Result<Vec<Review>, DomainError>;

    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if the book does not exist.
    async fn create_review(
        &self,
        identity: &AuthIdentity,
        input: CreateReviewInput,
    ) -> Result<Review, DomainError>;

    /// # Errors
    ///
    /// Returns [`DomainError::NotFoundOrUnauthorized`] unless the review
    /// exists and belongs to `identity`.
    async fn update_review(
        &self,
        identity: &AuthIdentity,
        id: i32,
        input: UpdateReviewInput,
    ) -> Result<Review, DomainError>;

    async fn delete_review(&self, identity: &AuthIdentity, id: i32) -> Result<bool, DomainError>;
}
