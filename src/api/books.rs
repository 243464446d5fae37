use async_graphql::{Context, ID, Object, Result};

use super::error::GqlResultExt;
use super::identity::require_identity;
use super::types::{BookObject, shared};
use super::validation::parse_id;
use crate::models::{CreateBookInput, UpdateBookInput};

#[derive(Default)]
pub struct BookQuery;

#[Object]
impl BookQuery {
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<BookObject>> {
        let books = shared(ctx)?.book_service.list_books().await.gql()?;
        Ok(books.into_iter().map(BookObject::from).collect())
    }

    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<BookObject>> {
        let id = parse_id(&id, "book").gql()?;
        let book = shared(ctx)?.book_service.get_book(id).await.gql()?;
        Ok(Some(BookObject::from(book)))
    }

    async fn search_books(&self, ctx: &Context<'_>, query: String) -> Result<Vec<BookObject>> {
        let books = shared(ctx)?
            .book_service
            .search_books(&query)
            .await
            .gql()?;
        Ok(books.into_iter().map(BookObject::from).collect())
    }

    async fn books_with_rating(&self, ctx: &Context<'_>) -> Result<Vec<BookObject>> {
        let books = shared(ctx)?.book_service.books_with_rating().await.gql()?;
        Ok(books.into_iter().map(BookObject::from).collect())
    }
}

#[derive(Default)]
pub struct BookMutation;

#[Object]
impl BookMutation {
    async fn create_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
    ) -> Result<BookObject> {
        require_identity(ctx).gql()?;
        shared(ctx)?
            .book_service
            .create_book(CreateBookInput { title, author })
            .await
            .map(BookObject::from)
            .gql()
    }

    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<BookObject> {
        require_identity(ctx).gql()?;
        let id = parse_id(&id, "book").gql()?;
        shared(ctx)?
            .book_service
            .update_book(id, UpdateBookInput { title, author })
            .await
            .map(BookObject::from)
            .gql()
    }

    /// Deletes the book along with all of its reviews.
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        require_identity(ctx).gql()?;
        let id = parse_id(&id, "book").gql()?;
        shared(ctx)?.book_service.delete_book(id).await.gql()
    }
}
