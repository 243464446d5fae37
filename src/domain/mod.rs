//! Domain primitives shared by services and the GraphQL layer.

pub mod error;

pub use error::DomainError;

use serde::{Deserialize, Serialize};

/// The authenticated caller, decoded from a verified bearer token.
///
/// Lives for a single request: the identity resolver builds it from the
/// `Authorization` header and attaches it to the GraphQL execution context.
/// It is never persisted, and it is not re-read from the database, so a role
/// or email change made after the token was issued is not reflected here
/// until the caller logs in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl AuthIdentity {
    #[must_use]
    pub fn new(id: i32, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
        }
    }

    /// Returns true if this identity owns a resource created by `user_id`.
    #[must_use]
    pub const fn owns(&self, user_id: i32) -> bool {
        self.id == user_id
    }
}
