pub mod book;
pub mod review;
pub mod user;

pub use book::{Book, BookWithRating, CreateBookInput, UpdateBookInput};
pub use review::{CreateReviewInput, Review, ReviewWithBook, UpdateReviewInput};
pub use user::{
    AuthPayload, LoginInput, RegisterInput, TopUser, UpdateProfileInput, UserProfile, UserStats,
};
