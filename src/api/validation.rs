use async_graphql::ID;

use crate::domain::DomainError;
use crate::services::stats::DEFAULT_TOP_USERS;

const MAX_LIMIT: usize = 1000;

/// Parses a GraphQL `ID` into a row id, naming the entity in the error.
pub fn parse_id(id: &ID, entity: &str) -> Result<i32, DomainError> {
    id.trim()
        .parse::<i32>()
        .map_err(|_| DomainError::validation(format!("Invalid {entity} ID")))
}

/// `None` falls back to the default leaderboard size.
pub fn validate_limit(limit: Option<i32>) -> Result<usize, DomainError> {
    let Some(limit) = limit else {
        return Ok(DEFAULT_TOP_USERS);
    };

    match usize::try_from(limit) {
        Ok(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
        _ => Err(DomainError::validation(format!(
            "Invalid limit: {limit}. Limit must be between 1 and {MAX_LIMIT}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(&ID::from("42"), "book").unwrap(), 42);
        assert_eq!(parse_id(&ID::from(" 7 "), "user").unwrap(), 7);

        let err = parse_id(&ID::from("abc"), "user").unwrap_err();
        assert_eq!(err.to_string(), "Invalid user ID");

        let err = parse_id(&ID::from(""), "book").unwrap_err();
        assert_eq!(err.to_string(), "Invalid book ID");
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None).unwrap(), 10);
        assert_eq!(validate_limit(Some(1)).unwrap(), 1);
        assert_eq!(validate_limit(Some(1000)).unwrap(), 1000);
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(-3)).is_err());
        assert!(validate_limit(Some(1001)).is_err());
    }
}
