use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, reviews};
use crate::models::{Book, Review, ReviewWithBook};

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Review>> {
        let reviews = Reviews::find()
            .order_by_asc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list reviews")?;

        Ok(reviews.into_iter().map(Review::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Review>> {
        let review = Reviews::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query review by ID")?;

        Ok(review.map(Review::from))
    }

    pub async fn list_for_book(&self, book_id: i32) -> Result<Vec<Review>> {
        let reviews = Reviews::find()
            .filter(reviews::Column::BookId.eq(book_id))
            .order_by_asc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query reviews for book")?;

        Ok(reviews.into_iter().map(Review::from).collect())
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Review>> {
        let reviews = Reviews::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .order_by_asc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query reviews for user")?;

        Ok(reviews.into_iter().map(Review::from).collect())
    }

    /// Reviews written by a user, newest first, each joined with its book.
    pub async fn list_for_user_with_books(&self, user_id: i32) -> Result<Vec<ReviewWithBook>> {
        let rows = Reviews::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .find_also_related(Books)
            .order_by_desc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query reviews with books")?;

        // The foreign key guarantees the book; a missing one means a
        // concurrent delete, and the review goes with it.
        Ok(rows
            .into_iter()
            .filter_map(|(review, book)| {
                book.map(|b| ReviewWithBook {
                    review: Review::from(review),
                    book: Book::from(b),
                })
            })
            .collect())
    }

    pub async fn create(&self, user_id: i32, book_id: i32, rating: i32, text: &str) -> Result<Review> {
        let review = reviews::ActiveModel {
            rating: Set(rating),
            text: Set(text.to_string()),
            user_id: Set(user_id),
            book_id: Set(book_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert review")?;

        Ok(Review::from(review))
    }

    pub async fn update(
        &self,
        id: i32,
        rating: Option<i32>,
        text: Option<String>,
    ) -> Result<Option<Review>> {
        let Some(review) = Reviews::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query review for update")?
        else {
            return Ok(None);
        };

        let mut active: reviews::ActiveModel = review.into();
        if let Some(rating) = rating {
            active.rating = Set(rating);
        }
        if let Some(text) = text {
            active.text = Set(text);
        }

        let review = active
            .update(&self.conn)
            .await
            .context("Failed to update review")?;

        Ok(Some(Review::from(review)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Reviews::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete review")?;

        Ok(result.rows_affected > 0)
    }
}
