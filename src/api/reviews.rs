use async_graphql::{Context, ID, Object, Result};

use super::error::GqlResultExt;
use super::identity::require_identity;
use super::types::{ReviewObject, shared};
use super::validation::parse_id;
use crate::models::{CreateReviewInput, UpdateReviewInput};

#[derive(Default)]
pub struct ReviewQuery;

#[Object]
impl ReviewQuery {
    async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<ReviewObject>> {
        let reviews = shared(ctx)?.review_service.list_reviews().await.gql()?;
        Ok(reviews.into_iter().map(ReviewObject::from).collect())
    }

    /// `null` when no review has this id.
    async fn review(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ReviewObject>> {
        let id = parse_id(&id, "review").gql()?;
        let review = shared(ctx)?.review_service.get_review(id).await.gql()?;
        Ok(review.map(ReviewObject::from))
    }
}

#[derive(Default)]
pub struct ReviewMutation;

#[Object]
impl ReviewMutation {
    async fn create_review(
        &self,
        ctx: &Context<'_>,
        book_id: ID,
        rating: i32,
        text: Option<String>,
    ) -> Result<ReviewObject> {
        let identity = require_identity(ctx).gql()?;
        let input = CreateReviewInput {
            book_id: parse_id(&book_id, "book").gql()?,
            rating,
            text,
        };

        shared(ctx)?
            .review_service
            .create_review(identity, input)
            .await
            .map(ReviewObject::from)
            .gql()
    }

    async fn update_review(
        &self,
        ctx: &Context<'_>,
        id: ID,
        rating: Option<i32>,
        text: Option<String>,
    ) -> Result<ReviewObject> {
        let identity = require_identity(ctx).gql()?;
        let id = parse_id(&id, "review").gql()?;
        shared(ctx)?
            .review_service
            .update_review(identity, id, UpdateReviewInput { rating, text })
            .await
            .map(ReviewObject::from)
            .gql()
    }

    async fn delete_review(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let identity = require_identity(ctx).gql()?;
        let id = parse_id(&id, "review").gql()?;
        shared(ctx)?
            .review_service
            .delete_review(identity, id)
            .await
            .gql()
    }
}
