//! # Infrastructure Layer
//!
//! Concrete persistence for the DataPulse session subsystem: MySQL
//! implementations of the core repository traits, built on SQLx. The
//! domain layer never depends on this crate; the API binary wires these
//! implementations in at startup.

pub mod database;

pub use database::connection::create_pool;
pub use database::mysql::{
    MySqlCredentialVerifier, MySqlSecurityEventRepository, MySqlTokenRepository,
};
