use serde::{Deserialize, Serialize};

use super::book::Book;
use crate::entities::reviews;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: i32,
    pub rating: i32,
    pub text: String,
    pub user_id: i32,
    pub book_id: i32,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            rating: model.rating,
            text: model.text,
            user_id: model.user_id,
            book_id: model.book_id,
        }
    }
}

/// A review joined with the book it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewWithBook {
    pub review: Review,
    pub book: Book,
}

/// Ratings are expected to be 1-5 but are stored as given.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewInput {
    pub book_id: i32,
    pub rating: i32,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReviewInput {
    pub rating: Option<i32>,
    pub text: Option<String>,
}
