//! Authentication and credential-hashing configuration

use serde::{Deserialize, Serialize};

use super::env_parse;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("datapulse"),
            audience: String::from("datapulse-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if the default development secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Refresh-secret hashing configuration (Argon2id)
///
/// The cost parameters control how expensive each hash/verify call is; the
/// pool bound controls how many of those calls may run at once.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HashingConfig {
    /// Argon2 memory cost in KiB
    pub memory_kib: u32,

    /// Argon2 iteration count
    pub iterations: u32,

    /// Argon2 lane count
    pub parallelism: u32,

    /// Maximum number of concurrent hash/verify operations; further calls
    /// queue until a slot frees up
    pub max_concurrent: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456, // 19 MiB
            iterations: 2,
            parallelism: 1,
            max_concurrent: 4,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string()),
            access_token_expiry: env_parse("JWT_ACCESS_TOKEN_EXPIRY", 900),
            refresh_token_expiry: env_parse("JWT_REFRESH_TOKEN_EXPIRY", 604800),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "datapulse".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "datapulse-api".to_string()),
        };

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: env_parse("HASH_MEMORY_KIB", defaults.memory_kib),
            iterations: env_parse("HASH_ITERATIONS", defaults.iterations),
            parallelism: env_parse("HASH_PARALLELISM", defaults.parallelism),
            max_concurrent: env_parse("HASH_MAX_CONCURRENT", defaults.max_concurrent),
        };

        Self { jwt, hashing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.issuer, "datapulse");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_hashing_config_default() {
        let config = HashingConfig::default();
        assert!(config.memory_kib >= 8);
        assert!(config.max_concurrent >= 1);
    }
}
