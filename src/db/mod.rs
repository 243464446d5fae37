use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{Book, Review, ReviewWithBook, UserProfile};

pub mod migrator;
pub mod repositories;

pub use repositories::user::UserChanges;

/// Data-access handle shared by every service.
///
/// Cloning is cheap: the underlying connection pool is reference counted.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `sqlite::memory:` would open its own
        // empty database, so in-memory stores use a single connection.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn book_repo(&self) -> repositories::book::BookRepository {
        repositories::book::BookRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        self.user_repo().list().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<UserProfile>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(UserProfile, String)>> {
        self.user_repo().get_credentials_by_email(email).await
    }

    pub async fn get_user_credentials(&self, id: i32) -> Result<Option<(UserProfile, String)>> {
        self.user_repo().get_credentials_by_id(id).await
    }

    pub async fn find_user_by_email_or_name(
        &self,
        email: &str,
        name: &str,
    ) -> Result<Option<UserProfile>> {
        self.user_repo().find_by_email_or_name(email, name).await
    }

    pub async fn email_taken_by_other(&self, email: &str, user_id: i32) -> Result<bool> {
        self.user_repo().email_taken_by_other(email, user_id).await
    }

    pub async fn name_taken_by_other(&self, name: &str, user_id: i32) -> Result<bool> {
        self.user_repo().name_taken_by_other(name, user_id).await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>> {
        self.user_repo().search(query).await
    }

    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserProfile> {
        self.user_repo().create(email, name, password_hash).await
    }

    pub async fn update_user(&self, id: i32, changes: UserChanges) -> Result<Option<UserProfile>> {
        self.user_repo().update(id, changes).await
    }

    pub async fn delete_user_with_reviews(&self, id: i32) -> Result<bool> {
        self.user_repo().delete_with_reviews(id).await
    }

    // Books

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        self.book_repo().list().await
    }

    pub async fn get_book(&self, id: i32) -> Result<Option<Book>> {
        self.book_repo().get(id).await
    }

    pub async fn find_book(
        &self,
        title: &str,
        author: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<Book>> {
        self.book_repo()
            .find_by_title_and_author(title, author, exclude_id)
            .await
    }

    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        self.book_repo().search(query).await
    }

    pub async fn create_book(&self, title: &str, author: &str) -> Result<Book> {
        self.book_repo().create(title, author).await
    }

    pub async fn update_book(
        &self,
        id: i32,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Option<Book>> {
        self.book_repo().update(id, title, author).await
    }

    pub async fn delete_book_with_reviews(&self, id: i32) -> Result<bool> {
        self.book_repo().delete_with_reviews(id).await
    }

    // Reviews

    pub async fn list_reviews(&self) -> Result<Vec<Review>> {
        self.review_repo().list().await
    }

    pub async fn get_review(&self, id: i32) -> Result<Option<Review>> {
        self.review_repo().get(id).await
    }

    pub async fn list_reviews_for_book(&self, book_id: i32) -> Result<Vec<Review>> {
        self.review_repo().list_for_book(book_id).await
    }

    pub async fn list_reviews_for_user(&self, user_id: i32) -> Result<Vec<Review>> {
        self.review_repo().list_for_user(user_id).await
    }

    pub async fn list_reviews_with_books_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReviewWithBook>> {
        self.review_repo().list_for_user_with_books(user_id).await
    }

    pub async fn create_review(
        &self,
        user_id: i32,
        book_id: i32,
        rating: i32,
        text: &str,
    ) -> Result<Review> {
        self.review_repo()
            .create(user_id, book_id, rating, text)
            .await
    }

    pub async fn update_review(
        &self,
        id: i32,
        rating: Option<i32>,
        text: Option<String>,
    ) -> Result<Option<Review>> {
        self.review_repo().update(id, rating, text).await
    }

    pub async fn delete_review(&self, id: i32) -> Result<bool> {
        self.review_repo().delete(id).await
    }
}
