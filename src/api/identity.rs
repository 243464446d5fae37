//! Resolves the caller's identity from the `Authorization` header.

use async_graphql::Context;
use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::domain::{AuthIdentity, DomainError};
use crate::services::TokenService;

/// Returns the identity carried by a valid bearer token.
///
/// A missing header means an anonymous request. An invalid or expired token
/// is logged and also treated as anonymous; the request itself never fails
/// here.
#[must_use]
pub fn resolve_identity(headers: &HeaderMap, tokens: &TokenService) -> Option<AuthIdentity> {
    let header = headers.get(AUTHORIZATION)?;

    let Ok(value) = header.to_str() else {
        tracing::warn!("Ignoring non-ASCII Authorization header");
        return None;
    };

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return None;
    }

    match tokens.verify(token) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid token");
            None
        }
    }
}

/// The authenticated caller, or [`DomainError::Unauthenticated`].
pub fn require_identity<'a>(ctx: &Context<'a>) -> Result<&'a AuthIdentity, DomainError> {
    ctx.data_opt::<AuthIdentity>()
        .ok_or(DomainError::Unauthenticated)
}
