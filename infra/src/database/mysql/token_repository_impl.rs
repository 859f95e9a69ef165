//! MySQL implementation of the TokenRepository trait.
//!
//! Backing table `refresh_tokens`:
//! `id CHAR(36) PK, user_id CHAR(36), role VARCHAR(64), secret_hash
//! VARCHAR(255), family_id CHAR(36), parent_hash VARCHAR(255) NULL,
//! user_agent TEXT NULL, ip_address VARCHAR(45) NULL, device_id
//! VARCHAR(128) NULL, display_name VARCHAR(128) NULL, created_at
//! DATETIME(6), expires_at DATETIME(6), last_used_at DATETIME(6) NULL,
//! revoked_at DATETIME(6) NULL`, indexed on `(user_id)` and `(family_id)`.
//!
//! The conditional revoke is a single `UPDATE ... WHERE revoked_at IS
//! NULL`; `rows_affected` tells the caller whether this statement won the
//! transition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use dp_core::domain::entities::token::{DeviceInfo, RefreshToken};
use dp_core::errors::DomainError;
use dp_core::repositories::TokenRepository;

/// MySQL-backed refresh-token repository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Storage {
            message: format!("{context}: {e}"),
        }
    }

    fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(value).map_err(|e| DomainError::Storage {
            message: format!("invalid UUID in column {column}: {e}"),
        })
    }

    /// Maps a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let get = |column: &str| -> Result<String, DomainError> {
            row.try_get::<String, _>(column)
                .map_err(|e| Self::storage_error(column, e))
        };

        let id = Self::parse_uuid(&get("id")?, "id")?;
        let user_id = Self::parse_uuid(&get("user_id")?, "user_id")?;
        let family_id = Self::parse_uuid(&get("family_id")?, "family_id")?;

        Ok(RefreshToken {
            id,
            user_id,
            role: get("role")?,
            secret_hash: get("secret_hash")?,
            family_id,
            parent_hash: row
                .try_get::<Option<String>, _>("parent_hash")
                .map_err(|e| Self::storage_error("parent_hash", e))?,
            device: DeviceInfo {
                user_agent: row
                    .try_get::<Option<String>, _>("user_agent")
                    .map_err(|e| Self::storage_error("user_agent", e))?,
                ip_address: row
                    .try_get::<Option<String>, _>("ip_address")
                    .map_err(|e| Self::storage_error("ip_address", e))?,
                device_id: row
                    .try_get::<Option<String>, _>("device_id")
                    .map_err(|e| Self::storage_error("device_id", e))?,
            },
            display_name: row
                .try_get::<Option<String>, _>("display_name")
                .map_err(|e| Self::storage_error("display_name", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::storage_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| Self::storage_error("expires_at", e))?,
            last_used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
                .map_err(|e| Self::storage_error("last_used_at", e))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| Self::storage_error("revoked_at", e))?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, user_id, role, secret_hash, family_id, parent_hash, \
     user_agent, ip_address, device_id, display_name, \
     created_at, expires_at, last_used_at, revoked_at";

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, role, secret_hash, family_id, parent_hash,
                user_agent, ip_address, device_id, display_name,
                created_at, expires_at, last_used_at, revoked_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.role)
            .bind(&token.secret_hash)
            .bind(token.family_id.to_string())
            .bind(&token.parent_hash)
            .bind(&token.device.user_agent)
            .bind(&token.device.ip_address)
            .bind(&token.device.device_id)
            .bind(&token.display_name)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.last_used_at)
            .bind(token.revoked_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to save refresh token", e))?;

        Ok(token)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM refresh_tokens WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to find refresh token", e))?;

        row.map(|r| Self::row_to_token(&r)).transpose()
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {SELECT_COLUMNS} FROM refresh_tokens \
             WHERE user_id = ? AND revoked_at IS NULL AND expires_at > ?"
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to list active tokens", e))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM refresh_tokens WHERE user_id = ?");

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to list tokens", e))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn mark_revoked(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        // Single conditional write: the database decides the winner.
        let query = "UPDATE refresh_tokens SET revoked_at = ? WHERE id = ? AND revoked_at IS NULL";

        let result = sqlx::query(query)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to revoke token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_family(
        &self,
        family_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let query =
            "UPDATE refresh_tokens SET revoked_at = ? WHERE family_id = ? AND revoked_at IS NULL";

        let result = sqlx::query(query)
            .bind(at)
            .bind(family_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to revoke token family", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn update_last_used(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let query = "UPDATE refresh_tokens SET last_used_at = ? WHERE id = ?";

        sqlx::query(query)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to stamp last_used_at", e))?;

        Ok(())
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("failed to delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
