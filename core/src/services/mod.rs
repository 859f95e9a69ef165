//! Business services containing domain logic and use cases.

pub mod audit;
pub mod auth;
pub mod crypto;
pub mod token;

// Re-export commonly used types
pub use audit::AuditSink;
pub use auth::{CredentialVerifier, VerifiedIdentity};
pub use crypto::SecretHasher;
pub use token::{
    DeviceRegistry, RevocationService, RotationEngine, SessionService, TokenCleanupConfig,
    TokenCleanupService, TokenIssuer, TokenServiceConfig, TokenStore,
};
