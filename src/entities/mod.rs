pub mod prelude;

pub mod books;
pub mod reviews;
pub mod users;
