//! Repository traits decoupling the domain from persistence.

pub mod audit;
pub mod token;

pub use audit::{MockSecurityEventRepository, NoOpSecurityEventRepository, SecurityEventRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
