//! Session facade composing issuance, rotation, revocation, and the
//! device view behind one API-facing surface.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::audit::{SecurityEvent, SecurityEventKind};
use crate::domain::entities::token::{Claims, DeviceInfo, SessionSummary, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::audit::AuditSink;
use crate::services::auth::VerifiedIdentity;
use crate::services::crypto::SecretHasher;

use super::config::TokenServiceConfig;
use super::devices::DeviceRegistry;
use super::issuer::TokenIssuer;
use super::revocation::RevocationService;
use super::rotation::RotationEngine;
use super::store::TokenStore;

/// High-level session operations backing the auth endpoints
pub struct SessionService<R: TokenRepository> {
    issuer: TokenIssuer,
    store: Arc<TokenStore<R>>,
    rotation: RotationEngine<R>,
    revocation: RevocationService<R>,
    devices: DeviceRegistry<R>,
    audit: AuditSink,
}

impl<R: TokenRepository> SessionService<R> {
    /// Wires the session components around one repository handle
    pub fn new(
        repository: Arc<R>,
        hasher: SecretHasher,
        config: TokenServiceConfig,
        audit: AuditSink,
    ) -> Self {
        let issuer = TokenIssuer::new(config);
        let store = Arc::new(TokenStore::new(repository, hasher));
        let revocation = RevocationService::new(Arc::clone(&store), audit.clone());
        let rotation = RotationEngine::new(
            Arc::clone(&store),
            issuer.clone(),
            revocation.clone(),
            audit.clone(),
        );
        let devices = DeviceRegistry::new(Arc::clone(&store));

        Self {
            issuer,
            store,
            rotation,
            revocation,
            devices,
            audit,
        }
    }

    /// Starts a new session for an externally-verified identity
    ///
    /// Creates a fresh rotation chain and returns both tokens.
    pub async fn login(
        &self,
        identity: VerifiedIdentity,
        device: DeviceInfo,
        display_name: Option<String>,
    ) -> DomainResult<TokenPair> {
        let issued = self.issuer.issue(
            identity.user_id,
            &identity.role,
            None,
            None,
            device,
            display_name,
        )?;
        let record = self.store.persist(issued.draft, &issued.refresh_secret).await?;

        info!(user_id = %record.user_id, family_id = %record.family_id, "session issued");
        self.audit.emit(
            SecurityEvent::new(SecurityEventKind::SessionIssued, record.user_id)
                .with_family(record.family_id)
                .with_token(record.id)
                .with_device(record.device.clone()),
        );

        Ok(self.pair(
            issued.access_token,
            compose_refresh_token(identity.user_id, &issued.refresh_secret),
        ))
    }

    /// Exchanges a presented refresh token for a new pair (rotation)
    pub async fn refresh(&self, presented: &str, device: DeviceInfo) -> DomainResult<TokenPair> {
        let (user_id, raw_secret) = parse_refresh_token(presented)?;
        let outcome = self.rotation.rotate(user_id, raw_secret, device).await?;

        Ok(self.pair(
            outcome.access_token,
            compose_refresh_token(user_id, &outcome.refresh_secret),
        ))
    }

    /// Revokes the presented refresh token
    ///
    /// Idempotent: an unknown or already-revoked token still acknowledges.
    pub async fn logout(&self, presented: &str) -> DomainResult<()> {
        let (user_id, raw_secret) = match parse_refresh_token(presented) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(()),
        };

        self.revocation.revoke_presented(user_id, raw_secret).await?;
        Ok(())
    }

    /// Active sessions of a principal, one entry per chain
    pub async fn list_devices(&self, user_id: Uuid) -> DomainResult<Vec<SessionSummary>> {
        self.devices.list_active_sessions(user_id).await
    }

    /// Revokes the chain behind one of the caller's sessions
    pub async fn revoke_device(&self, user_id: Uuid, record_id: Uuid) -> DomainResult<usize> {
        self.revocation.revoke_device(user_id, record_id).await
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.issuer.verify_access_token(token)
    }

    /// The issuer handle, for layers that only verify access tokens
    pub fn issuer(&self) -> TokenIssuer {
        self.issuer.clone()
    }

    fn pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_token,
            self.issuer.access_token_expiry(),
            self.issuer.refresh_token_expiry(),
        )
    }
}

/// Builds the wire form of a refresh token: the owning principal (to bound
/// the salted-digest scan) plus the raw secret
fn compose_refresh_token(user_id: Uuid, raw_secret: &str) -> String {
    format!("{}.{}", user_id.simple(), raw_secret)
}

/// Splits a wire refresh token back into principal and raw secret
fn parse_refresh_token(presented: &str) -> Result<(Uuid, &str), DomainError> {
    let (user_part, raw_secret) = presented
        .split_once('.')
        .ok_or(TokenError::InvalidRefreshToken)?;
    let user_id = Uuid::parse_str(user_part).map_err(|_| TokenError::InvalidRefreshToken)?;

    if raw_secret.is_empty() {
        return Err(TokenError::InvalidRefreshToken.into());
    }

    Ok((user_id, raw_secret))
}

#[cfg(test)]
mod wire_format_tests {
    use super::*;

    #[test]
    fn test_compose_parse_roundtrip() {
        let user_id = Uuid::new_v4();
        let wire = compose_refresh_token(user_id, "the-secret");

        let (parsed_id, secret) = parse_refresh_token(&wire).unwrap();
        assert_eq!(parsed_id, user_id);
        assert_eq!(secret, "the-secret");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_refresh_token("no-separator").is_err());
        assert!(parse_refresh_token("not-a-uuid.secret").is_err());
        assert!(parse_refresh_token(&format!("{}.", Uuid::new_v4().simple())).is_err());
    }
}
