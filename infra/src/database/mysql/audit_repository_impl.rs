//! MySQL implementation of the SecurityEventRepository trait.
//!
//! Backing table `security_events`:
//! `id CHAR(36) PK, kind VARCHAR(32), user_id CHAR(36), family_id CHAR(36)
//! NULL, token_id CHAR(36) NULL, user_agent TEXT NULL, ip_address
//! VARCHAR(45) NULL, device_id VARCHAR(128) NULL, detail TEXT NULL,
//! created_at DATETIME(6)`. Append-only; nothing here ever updates or
//! deletes rows.

use async_trait::async_trait;
use sqlx::MySqlPool;

use dp_core::domain::entities::audit::SecurityEvent;
use dp_core::errors::DomainError;
use dp_core::repositories::SecurityEventRepository;

/// MySQL-backed security event trail
pub struct MySqlSecurityEventRepository {
    pool: MySqlPool,
}

impl MySqlSecurityEventRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecurityEventRepository for MySqlSecurityEventRepository {
    async fn record(&self, event: &SecurityEvent) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO security_events (
                id, kind, user_id, family_id, token_id,
                user_agent, ip_address, device_id, detail, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(event.id.to_string())
            .bind(event.kind.as_str())
            .bind(event.user_id.to_string())
            .bind(event.family_id.map(|id| id.to_string()))
            .bind(event.token_id.map(|id| id.to_string()))
            .bind(&event.device.user_agent)
            .bind(&event.device.ip_address)
            .bind(&event.device.device_id)
            .bind(&event.detail)
            .bind(event.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("failed to record security event: {e}"),
            })?;

        Ok(())
    }
}
