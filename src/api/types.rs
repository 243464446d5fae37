//! GraphQL object types.
//!
//! Scalar fields come from the loaded row; relations and aggregates are
//! resolved lazily, so a query only pays for the fields it selects.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};

use super::error::GqlResultExt;
use crate::models::{self, BookWithRating, ReviewWithBook};
use crate::services::stats;
use crate::state::SharedState;

pub(crate) fn shared<'a>(ctx: &Context<'a>) -> Result<&'a Arc<SharedState>> {
    ctx.data::<Arc<SharedState>>()
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User", complex)]
pub struct UserObject {
    pub id: ID,
    pub email: String,
    pub name: String,
    pub role: String,
    #[graphql(skip)]
    pub user_id: i32,
}

impl From<models::UserProfile> for UserObject {
    fn from(user: models::UserProfile) -> Self {
        Self {
            id: ID::from(user.id.to_string()),
            email: user.email,
            name: user.name,
            role: user.role,
            user_id: user.id,
        }
    }
}

impl UserObject {
    async fn load_reviews(&self, ctx: &Context<'_>) -> Result<Vec<models::Review>> {
        shared(ctx)?
            .review_service
            .reviews_for_user(self.user_id)
            .await
            .gql()
    }
}

#[ComplexObject]
impl UserObject {
    async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<ReviewObject>> {
        Ok(self
            .load_reviews(ctx)
            .await?
            .into_iter()
            .map(ReviewObject::from)
            .collect())
    }

    async fn review_count(&self, ctx: &Context<'_>) -> Result<i32> {
        Ok(stats::review_count(&self.load_reviews(ctx).await?))
    }

    async fn average_rating(&self, ctx: &Context<'_>) -> Result<f64> {
        Ok(stats::average_rating(&self.load_reviews(ctx).await?))
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Book", complex)]
pub struct BookObject {
    pub id: ID,
    pub title: String,
    pub author: String,
    #[graphql(skip)]
    pub book_id: i32,
    /// Aggregates already computed by `booksWithRating`.
    #[graphql(skip)]
    pub rating: Option<(f64, i32)>,
}

impl From<models::Book> for BookObject {
    fn from(book: models::Book) -> Self {
        Self {
            id: ID::from(book.id.to_string()),
            title: book.title,
            author: book.author,
            book_id: book.id,
            rating: None,
        }
    }
}

impl From<BookWithRating> for BookObject {
    fn from(entry: BookWithRating) -> Self {
        Self {
            rating: Some((entry.average_rating, entry.review_count)),
            ..Self::from(entry.book)
        }
    }
}

impl BookObject {
    async fn load_reviews(&self, ctx: &Context<'_>) -> Result<Vec<models::Review>> {
        shared(ctx)?
            .review_service
            .reviews_for_book(self.book_id)
            .await
            .gql()
    }
}

#[ComplexObject]
impl BookObject {
    async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<ReviewObject>> {
        Ok(self
            .load_reviews(ctx)
            .await?
            .into_iter()
            .map(ReviewObject::from)
            .collect())
    }

    async fn average_rating(&self, ctx: &Context<'_>) -> Result<f64> {
        if let Some((average, _)) = self.rating {
            return Ok(average);
        }
        Ok(stats::average_rating(&self.load_reviews(ctx).await?))
    }

    async fn review_count(&self, ctx: &Context<'_>) -> Result<i32> {
        if let Some((_, count)) = self.rating {
            return Ok(count);
        }
        Ok(stats::review_count(&self.load_reviews(ctx).await?))
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Review", complex)]
pub struct ReviewObject {
    pub id: ID,
    pub rating: i32,
    pub text: String,
    #[graphql(skip)]
    pub user_id: i32,
    #[graphql(skip)]
    pub book_id: i32,
    #[graphql(skip)]
    pub loaded_book: Option<models::Book>,
}

impl From<models::Review> for ReviewObject {
    fn from(review: models::Review) -> Self {
        Self {
            id: ID::from(review.id.to_string()),
            rating: review.rating,
            text: review.text,
            user_id: review.user_id,
            book_id: review.book_id,
            loaded_book: None,
        }
    }
}

impl From<ReviewWithBook> for ReviewObject {
    fn from(entry: ReviewWithBook) -> Self {
        Self {
            loaded_book: Some(entry.book),
            ..Self::from(entry.review)
        }
    }
}

#[ComplexObject]
impl ReviewObject {
    async fn user(&self, ctx: &Context<'_>) -> Result<UserObject> {
        shared(ctx)?
            .user_service
            .get_user(self.user_id)
            .await
            .map(UserObject::from)
            .gql()
    }

    async fn book(&self, ctx: &Context<'_>) -> Result<BookObject> {
        if let Some(book) = &self.loaded_book {
            return Ok(BookObject::from(book.clone()));
        }

        shared(ctx)?
            .book_service
            .get_book(self.book_id)
            .await
            .map(BookObject::from)
            .gql()
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "AuthPayload")]
pub struct AuthPayloadObject {
    pub token: String,
    pub user: UserObject,
}

impl From<models::AuthPayload> for AuthPayloadObject {
    fn from(payload: models::AuthPayload) -> Self {
        Self {
            token: payload.token,
            user: UserObject::from(payload.user),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "UserStats")]
pub struct UserStatsObject {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub review_count: i32,
    pub average_rating: f64,
    /// Most reviewed author.
    pub favorite_genre: Option<String>,
}

impl From<models::UserStats> for UserStatsObject {
    fn from(stats: models::UserStats) -> Self {
        Self {
            id: ID::from(stats.id.to_string()),
            name: stats.name,
            email: stats.email,
            review_count: stats.review_count,
            average_rating: stats.average_rating,
            favorite_genre: stats.favorite_genre,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "TopUser")]
pub struct TopUserObject {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub review_count: i32,
    pub average_rating: f64,
}

impl From<models::TopUser> for TopUserObject {
    fn from(user: models::TopUser) -> Self {
        Self {
            id: ID::from(user.id.to_string()),
            name: user.name,
            email: user.email,
            review_count: user.review_count,
            average_rating: user.average_rating,
        }
    }
}
