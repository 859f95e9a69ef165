//! # DataPulse Core
//!
//! Core business logic and domain layer for the DataPulse backend.
//! This crate owns the session-token lifecycle: issuing access/refresh
//! pairs, rotating refresh credentials on use, detecting refresh-token
//! reuse, and managing per-device sessions. Persistence sits behind
//! repository traits so the domain stays independent of any database.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::{DomainError, DomainResult, TokenError};
