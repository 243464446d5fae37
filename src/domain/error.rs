//! Error taxonomy for every operation exposed by the API.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors returned by the domain services.
///
/// Every variant is terminal for the operation that produced it; nothing is
/// retried. The `Display` output is the message shown to the caller.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing input; the message names the offending field.
    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    Unauthenticated,

    /// Identity present but without rights over the target, or the target
    /// does not exist. Both cases share one message so that callers cannot
    /// probe for resources owned by other users.
    #[error("{0} not found or not authorized")]
    NotFoundOrUnauthorized(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// Login failure. Unknown email and wrong password are not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Machine-readable code attached to GraphQL error extensions.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "BAD_USER_INPUT",
            Self::Unauthenticated | Self::InvalidCredentials | Self::InvalidToken(_) => {
                "UNAUTHENTICATED"
            }
            Self::NotFoundOrUnauthorized(_) => "FORBIDDEN",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) | Self::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

impl From<DbErr> for DomainError {
    fn from(err: DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        if err.downcast_ref::<DbErr>().is_some() {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(format!("{err:#}"))
        }
    }
}

/// Returns the store's message when `err` is a unique-constraint rejection.
///
/// The pre-insert existence checks are only a fast path; two concurrent
/// writers can both pass them, and the store's unique index rejects the
/// second. Callers turn this into the same `Conflict` the pre-check reports.
#[must_use]
pub fn unique_violation(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<DbErr>()?.sql_err()? {
        SqlErr::UniqueConstraintViolation(msg) => Some(msg),
        _ => None,
    }
}

/// True when `err` is a rejected foreign-key reference, such as a row
/// inserted against a parent deleted after it was looked up.
#[must_use]
pub fn foreign_key_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::ForeignKeyConstraintViolation(_)))
}
