pub mod password;
pub use password::{Argon2Hasher, CredentialHasher};

pub mod token;
pub use token::TokenService;

pub mod stats;

pub mod auth_service;
pub use auth_service::AuthService;

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod user_service;
pub use user_service::UserService;

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;

pub mod book_service;
pub use book_service::BookService;

pub mod book_service_impl;
pub use book_service_impl::SeaOrmBookService;

pub mod review_service;
pub use review_service::ReviewService;

pub mod review_service_impl;
pub use review_service_impl::SeaOrmReviewService;

pub mod seed;
