//! Memory-hard hashing and verification of refresh-token secrets.
//!
//! Argon2id is deliberately expensive, so every hash/verify call runs on
//! the blocking pool behind a semaphore: at most `max_concurrent`
//! operations execute at once and further callers queue, keeping a burst of
//! refresh traffic from starving the async executor.

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
};
use std::sync::Arc;
use tokio::sync::Semaphore;

use dp_shared::config::HashingConfig;

use crate::errors::DomainError;

/// Salted Argon2id hasher with a bounded worker pool
#[derive(Clone)]
pub struct SecretHasher {
    params: Params,
    permits: Arc<Semaphore>,
}

impl SecretHasher {
    /// Creates a hasher from configuration
    ///
    /// Fails when the Argon2 cost parameters are out of range.
    pub fn new(config: &HashingConfig) -> Result<Self, DomainError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| DomainError::Hashing {
                message: format!("invalid Argon2 parameters: {e}"),
            })?;

        Ok(Self {
            params,
            permits: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Computes a salted digest of `secret` (PHC string format)
    pub async fn hash(&self, secret: &str) -> Result<String, DomainError> {
        let _permit = self.acquire().await?;
        let params = self.params.clone();
        let secret = secret.to_owned();

        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
            let salt = SaltString::generate(rand::thread_rng());

            argon2
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| DomainError::Hashing {
                    message: format!("hash computation failed: {e}"),
                })
        })
        .await
        .map_err(|e| DomainError::Hashing {
            message: format!("hashing task failed: {e}"),
        })?
    }

    /// Verifies `secret` against a stored digest
    ///
    /// Returns `Ok(false)` only for a genuine mismatch; a malformed digest
    /// or backend fault is an error and must not be read as "wrong secret".
    pub async fn verify(&self, secret: &str, digest: &str) -> Result<bool, DomainError> {
        let _permit = self.acquire().await?;
        let params = self.params.clone();
        let secret = secret.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&digest).map_err(|e| DomainError::Hashing {
                message: format!("malformed stored digest: {e}"),
            })?;
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

            match argon2.verify_password(secret.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(DomainError::Hashing {
                    message: format!("verification backend failure: {e}"),
                }),
            }
        })
        .await
        .map_err(|e| DomainError::Hashing {
            message: format!("hashing task failed: {e}"),
        })?
    }

    async fn acquire(&self) -> Result<tokio::sync::OwnedSemaphorePermit, DomainError> {
        self.permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| DomainError::Hashing {
                message: "hashing pool is shut down".to_string(),
            })
    }
}
