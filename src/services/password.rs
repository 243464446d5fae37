//! Credential hashing.
//!
//! Passwords are hashed with Argon2id using the work factor from
//! [`SecurityConfig`]; the salt and parameters travel inside the PHC string, so
//! hashes created under older parameters keep verifying after a config change.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tokio::task;

use crate::config::SecurityConfig;
use crate::domain::DomainError;

/// One-way hashing and verification of plaintext passwords.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Returns false for a mismatch and for an unparsable stored hash.
    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}

pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &SecurityConfig) -> anyhow::Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {e}")))?;

        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hashed) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };

        // Comparison of the derived key is constant time inside `argon2`.
        self.argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hashes on the blocking pool; Argon2 would otherwise stall the runtime.
pub async fn hash_password(
    hasher: Arc<dyn CredentialHasher>,
    plaintext: String,
) -> Result<String, DomainError> {
    task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| DomainError::Internal(format!("Password hashing task panicked: {e}")))?
}

/// Verifies on the blocking pool.
pub async fn verify_password(
    hasher: Arc<dyn CredentialHasher>,
    plaintext: String,
    hashed: String,
) -> Result<bool, DomainError> {
    task::spawn_blocking(move || hasher.verify(&plaintext, &hashed))
        .await
        .map_err(|e| DomainError::Internal(format!("Password verification task panicked: {e}")))
}
