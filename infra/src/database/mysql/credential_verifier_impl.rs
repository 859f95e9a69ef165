//! MySQL-backed credential verification.
//!
//! Thin adapter over the `users` table (`id CHAR(36) PK, email
//! VARCHAR(255) UNIQUE, role VARCHAR(64), password_hash VARCHAR(255)`).
//! The session subsystem consumes only the verified-identity decision;
//! account management itself lives elsewhere.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use dp_core::errors::DomainError;
use dp_core::services::auth::{CredentialVerifier, VerifiedIdentity};
use dp_core::services::crypto::SecretHasher;

/// Verifies email/password credentials against the user table
pub struct MySqlCredentialVerifier {
    pool: MySqlPool,
    hasher: SecretHasher,
}

impl MySqlCredentialVerifier {
    pub fn new(pool: MySqlPool, hasher: SecretHasher) -> Self {
        Self { pool, hasher }
    }
}

#[async_trait]
impl CredentialVerifier for MySqlCredentialVerifier {
    async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedIdentity>, DomainError> {
        let row = sqlx::query("SELECT id, role, password_hash FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("failed to look up user: {e}"),
            })?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let id: String = row.try_get("id").map_err(|e| DomainError::Storage {
            message: format!("failed to read user id: {e}"),
        })?;
        let role: String = row.try_get("role").map_err(|e| DomainError::Storage {
            message: format!("failed to read user role: {e}"),
        })?;
        let password_hash: String =
            row.try_get("password_hash").map_err(|e| DomainError::Storage {
                message: format!("failed to read password hash: {e}"),
            })?;

        let user_id = Uuid::parse_str(&id).map_err(|e| DomainError::Storage {
            message: format!("invalid user UUID: {e}"),
        })?;

        if self.hasher.verify(password, &password_hash).await? {
            Ok(Some(VerifiedIdentity { user_id, role }))
        } else {
            Ok(None)
        }
    }
}
