//! `SeaORM` implementation of the `BookService` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::DomainError;
use crate::domain::error::unique_violation;
use crate::models::{Book, BookWithRating, CreateBookInput, Review, UpdateBookInput};
use crate::services::book_service::BookService;
use crate::services::stats;

pub const BOOK_EXISTS: &str = "A book with this title and author already exists";

pub struct SeaOrmBookService {
    store: Store,
}

impl SeaOrmBookService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn book_conflict(err: anyhow::Error) -> DomainError {
    if unique_violation(&err).is_some() {
        DomainError::conflict(BOOK_EXISTS)
    } else {
        err.into()
    }
}

#[async_trait]
impl BookService for SeaOrmBookService {
    async fn list_books(&self) -> Result<Vec<Book>, DomainError> {
        Ok(self.store.list_books().await?)
    }

    async fn get_book(&self, id: i32) -> Result<Book, DomainError> {
        self.store
            .get_book(id)
            .await?
            .ok_or(DomainError::NotFound("Book"))
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("Search query is required"));
        }

        Ok(self.store.search_books(query).await?)
    }

    async fn books_with_rating(&self) -> Result<Vec<BookWithRating>, DomainError> {
        let books = self.store.list_books().await?;

        let mut by_book: HashMap<i32, Vec<Review>> = HashMap::new();
        for review in self.store.list_reviews().await? {
            by_book.entry(review.book_id).or_default().push(review);
        }

        Ok(books
            .into_iter()
            .map(|book| {
                let reviews = by_book.remove(&book.id).unwrap_or_default();
                BookWithRating {
                    average_rating: stats::average_rating(&reviews),
                    review_count: stats::review_count(&reviews),
                    book,
                }
            })
            .collect())
    }

    async fn create_book(&self, input: CreateBookInput) -> Result<Book, DomainError> {
        let input = input.normalized()?;

        if self
            .store
            .find_book(&input.title, &input.author, None)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(BOOK_EXISTS));
        }

        let book = self
            .store
            .create_book(&input.title, &input.author)
            .await
            .map_err(book_conflict)?;

        info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    async fn update_book(&self, id: i32, input: UpdateBookInput) -> Result<Book, DomainError> {
        let input = input.normalized()?;
        let current = self.get_book(id).await?;

        let title = input.title.as_deref().unwrap_or(&current.title);
        let author = input.author.as_deref().unwrap_or(&current.author);
        if self
            .store
            .find_book(title, author, Some(id))
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(BOOK_EXISTS));
        }

        self.store
            .update_book(id, input.title, input.author)
            .await
            .map_err(book_conflict)?
            .ok_or(DomainError::NotFound("Book"))
    }

    async fn delete_book(&self, id: i32) -> Result<bool, DomainError> {
        if !self.store.delete_book_with_reviews(id).await? {
            return Err(DomainError::NotFound("Book"));
        }

        info!(book_id = id, "Book deleted");
        Ok(true)
    }
}
