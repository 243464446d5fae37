//! `SeaORM` implementation of the `ReviewService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::domain::error::foreign_key_violation;
use crate::domain::{AuthIdentity, DomainError};
use crate::models::{CreateReviewInput, Review, UpdateReviewInput};
use crate::services::review_service::ReviewService;

pub struct SeaOrmReviewService {
    store: Store,
}

impl SeaOrmReviewService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Loads a review the caller is allowed to modify.
    async fn owned_review(&self, identity: &AuthIdentity, id: i32) -> Result<Review, DomainError> {
        match self.store.get_review(id).await? {
            Some(review) if identity.owns(review.user_id) => Ok(review),
            Some(_) => {
                debug!(review_id = id, user_id = identity.id, "Rejected non-owner review access");
                Err(DomainError::NotFoundOrUnauthorized("Review"))
            }
            None => Err(DomainError::NotFoundOrUnauthorized("Review")),
        }
    }
}

/// A review insert that loses a race with `deleteBook` fails on the
/// `book_id` reference; it reports the same error as the up-front check.
fn missing_book(err: anyhow::Error) -> DomainError {
    if foreign_key_violation(&err) {
        DomainError::NotFound("Book")
    } else {
        err.into()
    }
}

#[async_trait]
impl ReviewService for SeaOrmReviewService {
    async fn list_reviews(&self) -> Result<Vec<Review>, DomainError> {
        Ok(self.store.list_reviews().await?)
    }

    async fn get_review(&self, id: i32) -> Result<Option<Review>, DomainError> {
        Ok(self.store.get_review(id).await?)
    }

    async fn reviews_for_book(&self, book_id: i32) -> Result<Vec<Review>, DomainError> {
        Ok(self.store.list_reviews_for_book(book_id).await?)
    }

    async fn reviews_for_user(&self, user_id: i32) -> Result<Vec<Review>, DomainError> {
        Ok(self.store.list_reviews_for_user(user_id).await?)
    }

    async fn create_review(
        &self,
        identity: &AuthIdentity,
        input: CreateReviewInput,
    ) -> Result<Review, DomainError> {
        if self.store.get_book(input.book_id).await?.is_none() {
            return Err(DomainError::NotFound("Book"));
        }

        let text = input.text.unwrap_or_default();
        let review = self
            .store
            .create_review(identity.id, input.book_id, input.rating, &text)
            .await
            .map_err(missing_book)?;

        info!(
            review_id = review.id,
            book_id = review.book_id,
            user_id = identity.id,
            "Review created"
        );
        Ok(review)
    }

    async fn update_review(
        &self,
        identity: &AuthIdentity,
        id: i32,
        input: UpdateReviewInput,
    ) -> Result<Review, DomainError> {
        let review = self.owned_review(identity, id).await?;

        self.store
            .update_review(review.id, input.rating, input.text)
            .await?
            .ok_or(DomainError::NotFoundOrUnauthorized("Review"))
    }

    async fn delete_review(&self, identity: &AuthIdentity, id: i32) -> Result<bool, DomainError> {
        let review = self.owned_review(identity, id).await?;
        self.store.delete_review(review.id).await?;
        Ok(true)
    }
}
