//! Shared utilities and common types for the DataPulse server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Common response structures

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, HashingConfig, JwtConfig, ServerConfig};
pub use types::ErrorBody;
