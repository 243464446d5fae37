use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{books, prelude::*, reviews};
use crate::models::Book;

pub struct BookRepository {
    conn: DatabaseConnection,
}

impl BookRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Book>> {
        let books = Books::find()
            .order_by_asc(books::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list books")?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Book>> {
        let book = Books::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query book by ID")?;

        Ok(book.map(Book::from))
    }

    /// Finds a book with exactly this title and author, optionally ignoring
    /// one id (the book being updated).
    pub async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Book>> {
        let mut query = Books::find()
            .filter(books::Column::Title.eq(title))
            .filter(books::Column::Author.eq(author));

        if let Some(id) = exclude_id {
            query = query.filter(books::Column::Id.ne(id));
        }

        let book = query
            .one(&self.conn)
            .await
            .context("Failed to query book by title and author")?;

        Ok(book.map(Book::from))
    }

    /// Substring match on title or author
    pub async fn search(&self, query: &str) -> Result<Vec<Book>> {
        let books = Books::find()
            .filter(
                Condition::any()
                    .add(books::Column::Title.contains(query))
                    .add(books::Column::Author.contains(query)),
            )
            .order_by_asc(books::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to search books")?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    pub async fn create(&self, title: &str, author: &str) -> Result<Book> {
        let book = books::ActiveModel {
            title: Set(title.to_string()),
            author: Set(author.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert book")?;

        Ok(Book::from(book))
    }

    pub async fn update(
        &self,
        id: i32,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Option<Book>> {
        let Some(book) = Books::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query book for update")?
        else {
            return Ok(None);
        };

        let mut active: books::ActiveModel = book.into();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(author) = author {
            active.author = Set(author);
        }

        let book = active
            .update(&self.conn)
            .await
            .context("Failed to update book")?;

        Ok(Some(Book::from(book)))
    }

    /// Deletes the book's reviews, then the book, in one transaction.
    /// Returns false if the book did not exist.
    pub async fn delete_with_reviews(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Reviews::delete_many()
            .filter(reviews::Column::BookId.eq(id))
            .exec(&txn)
            .await
            .context("Failed to delete book reviews")?;

        let result = Books::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete book")?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
