//! Domain service for the book catalogue.

use crate::domain::DomainError;
use crate::models::{Book, BookWithRating, CreateBookInput, UpdateBookInput};

#[async_trait::async_trait]
pub trait BookService: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, DomainError>;

    async fn get_book(&self, id: i32) -> Result<Book, DomainError>;

    /// Substring match on title or author.
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, DomainError>;

    /// Every book with its rounded average rating and review count.
    async fn books_with_rating(&self) -> Result<Vec<BookWithRating>, DomainError>;

    /// # Errors
    ///
    /// Returns [`DomainError::Conflict`] if a book with the same title and
    /// author already exists.
    async fn create_book(&self, input: CreateBookInput) -> Result<Book, DomainError>;

    /// Fields left `None` keep their current value.
    async fn update_book(&self, id: i32, input: UpdateBookInput) -> Result<Book, DomainError>;

    /// Removes the book together with its reviews.
    async fn delete_book(&self, id: i32) -> Result<bool, DomainError>;
}
