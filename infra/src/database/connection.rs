//! MySQL connection pool construction.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

use dp_core::errors::DomainError;
use dp_shared::config::DatabaseConfig;

/// Builds the shared connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::Storage {
            message: format!("failed to connect to database: {e}"),
        })?;

    info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}
