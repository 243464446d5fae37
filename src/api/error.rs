use async_graphql::{Error, ErrorExtensions};

use crate::domain::DomainError;

impl ErrorExtensions for DomainError {
    fn extend(&self) -> Error {
        if self.is_internal() {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let code = self.code();
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Converts service results into GraphQL results, keeping the error code.
pub trait GqlResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> GqlResultExt<T> for Result<T, DomainError> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}
