//! Configuration types for the DataPulse server.
//!
//! Each config struct carries sensible development defaults and a
//! `from_env` constructor; `AppConfig::from_env` loads everything at once
//! (reading a `.env` file when present).

pub mod auth;
pub mod database;
pub mod server;

pub use auth::{AuthConfig, HashingConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
        }
    }
}

/// Read an environment variable and parse it, falling back to a default
/// when the variable is unset or malformed.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
