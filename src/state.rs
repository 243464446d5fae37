use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    Argon2Hasher, AuthService, BookService, CredentialHasher, ReviewService, SeaOrmAuthService,
    SeaOrmBookService, SeaOrmReviewService, SeaOrmUserService, TokenService, UserService,
};

/// Long-lived collaborators shared by the HTTP layer and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub hasher: Arc<dyn CredentialHasher>,

    pub tokens: Arc<TokenService>,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,

    pub book_service: Arc<dyn BookService>,

    pub review_service: Arc<dyn ReviewService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    /// Wires the services around an already connected store.
    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new(&config.security)?);
        let tokens = Arc::new(TokenService::from_config(&config.security));

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            hasher.clone(),
            tokens.clone(),
        )) as Arc<dyn AuthService>;

        let user_service =
            Arc::new(SeaOrmUserService::new(store.clone(), hasher.clone())) as Arc<dyn UserService>;

        let book_service = Arc::new(SeaOrmBookService::new(store.clone())) as Arc<dyn BookService>;

        let review_service =
            Arc::new(SeaOrmReviewService::new(store.clone())) as Arc<dyn ReviewService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            hasher,
            tokens,
            auth_service,
            user_service,
            book_service,
            review_service,
        })
    }
}
