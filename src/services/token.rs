//! Signed identity tokens.
//!
//! Tokens are HS256 JWTs carrying the caller's id, email and name. Nothing
//! is stored server-side; a token stays valid until its `exp` passes.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::domain::{AuthIdentity, DomainError};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i32,
    email: String,
    name: String,
    iat: i64,
    exp: i64,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::days(i64::from(config.token_ttl_days)),
        )
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, identity: &AuthIdentity) -> Result<String, DomainError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        identity: &AuthIdentity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let claims = Claims {
            id: identity.id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DomainError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Checks signature and expiry, then returns the embedded identity.
    pub fn verify(&self, token: &str) -> Result<AuthIdentity, DomainError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| DomainError::InvalidToken(e.to_string()))?;

        let claims = data.claims;
        Ok(AuthIdentity::new(claims.id, claims.email, claims.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::days(7))
    }

    fn alice() -> AuthIdentity {
        AuthIdentity::new(1, "a@x.com", "alice")
    }

    #[test]
    fn issue_then_verify() {
        let tokens = service();
        let token = tokens.issue(&alice()).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(tokens.verify(&token).unwrap(), alice());
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = TokenService::new("other-secret", Duration::days(7))
            .issue(&alice())
            .unwrap();
        let err = service().verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken(_)));
    }

    #[test]
    fn rejects_tampered_token() {
        let tokens = service();
        let token = tokens.issue(&alice()).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = tokens
            .issue(&AuthIdentity::new(2, "b@x.com", "bob"))
            .unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let tampered = parts.join(".");

        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let tokens = service();
        assert!(tokens.verify("").is_err());
        assert!(tokens.verify("not.a.token").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::days(8);
        let token = tokens.issue_at(&alice(), issued_at).unwrap();
        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken(_)));
    }

    #[test]
    fn token_is_valid_until_ttl_elapses() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::days(6);
        let token = tokens.issue_at(&alice(), issued_at).unwrap();
        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn ttl_comes_from_config() {
        let config = SecurityConfig {
            token_ttl_days: 3,
            ..SecurityConfig::default()
        };
        assert_eq!(TokenService::from_config(&config).ttl(), Duration::days(3));
    }
}
