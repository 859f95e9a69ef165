//! Session-token lifecycle services.
//!
//! This module owns the refresh-token state machine:
//! - [`TokenIssuer`] mints access tokens and refresh secrets
//! - [`TokenStore`] persists and matches hashed refresh records
//! - [`RotationEngine`] rotates a presented secret or classifies its rejection
//! - [`RevocationService`] revokes single records and whole chains
//! - [`DeviceRegistry`] lists a principal's active sessions
//! - [`TokenCleanupService`] purges long-expired records in the background
//! - [`SessionService`] is the facade the API layer talks to

mod cleanup;
mod config;
mod devices;
mod issuer;
mod revocation;
mod rotation;
mod service;
mod store;

#[cfg(test)]
mod tests;

pub use cleanup::{TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use devices::DeviceRegistry;
pub use issuer::{IssuedSession, TokenIssuer};
pub use revocation::RevocationService;
pub use rotation::{RotationEngine, RotationOutcome};
pub use service::SessionService;
pub use store::TokenStore;
