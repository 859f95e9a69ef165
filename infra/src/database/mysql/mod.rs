//! MySQL repository implementations.

mod audit_repository_impl;
mod credential_verifier_impl;
mod token_repository_impl;

pub use audit_repository_impl::MySqlSecurityEventRepository;
pub use credential_verifier_impl::MySqlCredentialVerifier;
pub use token_repository_impl::MySqlTokenRepository;
