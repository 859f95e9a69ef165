//! External credential-verification collaborator.
//!
//! The password check itself lives outside this subsystem; the session
//! services consume only its decision. Implementations typically wrap a
//! user store; tests use [`MockCredentialVerifier`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Identity assertion produced by a successful credential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Principal ID
    pub user_id: Uuid,
    /// Role claim, carried opaquely into issued tokens
    pub role: String,
}

/// Trait for the external password-verification step
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check credentials; `Ok(None)` means "credentials invalid"
    ///
    /// Errors are infrastructure faults, never a verdict on the
    /// credentials.
    async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedIdentity>, DomainError>;
}

/// Static credential verifier for tests
#[derive(Debug, Default)]
pub struct MockCredentialVerifier {
    accounts: Vec<(String, String, VerifiedIdentity)>,
}

impl MockCredentialVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account accepted by `verify`
    pub fn with_account(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        identity: VerifiedIdentity,
    ) -> Self {
        self.accounts.push((email.into(), password.into(), identity));
        self
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedIdentity>, DomainError> {
        Ok(self
            .accounts
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, identity)| identity.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_verifier() {
        let identity = VerifiedIdentity {
            user_id: Uuid::new_v4(),
            role: "analyst".to_string(),
        };
        let verifier =
            MockCredentialVerifier::new().with_account("a@example.com", "pw", identity.clone());

        assert_eq!(
            verifier.verify("a@example.com", "pw").await.unwrap(),
            Some(identity)
        );
        assert_eq!(verifier.verify("a@example.com", "nope").await.unwrap(), None);
        assert_eq!(verifier.verify("b@example.com", "pw").await.unwrap(), None);
    }
}
