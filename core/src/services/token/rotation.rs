//! The rotation state machine.
//!
//! A presented refresh secret either wins the conditional revoke on its
//! record and is exchanged for a successor, or it is rejected as stale,
//! expired, invalid, or - the critical case - as reuse of an
//! already-consumed secret, which revokes the whole chain.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::audit::{SecurityEvent, SecurityEventKind};
use crate::domain::entities::token::{DeviceInfo, RefreshToken};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::audit::AuditSink;

use super::issuer::TokenIssuer;
use super::revocation::RevocationService;
use super::store::TokenStore;
use std::sync::Arc;

/// Result of a successful rotation: the successor credentials and record
#[derive(Debug, Clone)]
pub struct RotationOutcome {
    pub access_token: String,
    pub refresh_secret: String,
    pub record: RefreshToken,
}

/// Decides the fate of every presented refresh secret
pub struct RotationEngine<R: TokenRepository> {
    store: Arc<TokenStore<R>>,
    issuer: TokenIssuer,
    revocation: RevocationService<R>,
    audit: AuditSink,
}

impl<R: TokenRepository> RotationEngine<R> {
    pub fn new(
        store: Arc<TokenStore<R>>,
        issuer: TokenIssuer,
        revocation: RevocationService<R>,
        audit: AuditSink,
    ) -> Self {
        Self {
            store,
            issuer,
            revocation,
            audit,
        }
    }

    /// Rotates a presented refresh secret
    ///
    /// The only success path runs through winning the conditional revoke on
    /// the matched active record. Losing that race is a benign
    /// double-submission (`StaleRotation`), and must not be confused with
    /// presenting a secret that was consumed in the past (`ReuseDetected`) -
    /// collapsing the two would either mass-logout retrying clients or let
    /// stolen-token replays go unnoticed.
    pub async fn rotate(
        &self,
        user_id: Uuid,
        raw_secret: &str,
        device: DeviceInfo,
    ) -> DomainResult<RotationOutcome> {
        if let Some(record) = self.store.find_active_match(user_id, raw_secret).await? {
            return self.rotate_active(record, device).await;
        }

        // No active match: inspect the full history to classify the failure.
        match self.store.find_any_match(user_id, raw_secret).await? {
            // Revoked AND consumed (a successor was minted off it): the
            // defining signature of replaying an intercepted token.
            Some(record) if record.is_revoked() && record.last_used_at.is_some() => {
                self.handle_reuse(record, device).await
            }
            // Revoked without ever being consumed (logout, device removal,
            // or an earlier family sweep): dead, but not evidence of theft.
            Some(record) if record.is_revoked() => {
                self.reject(user_id, &device, TokenError::InvalidRefreshToken)
            }
            Some(record) if record.is_expired() => {
                self.reject(user_id, &device, TokenError::RefreshTokenExpired)
            }
            Some(_) => {
                // Active again by the time of the forensic lookup: the record
                // changed state between the two reads. Rejecting as invalid is
                // the safe default and takes no chain-wide action.
                self.reject(user_id, &device, TokenError::InvalidRefreshToken)
            }
            None => self.reject(user_id, &device, TokenError::InvalidRefreshToken),
        }
    }

    /// Success path: CAS the predecessor, then persist its successor
    async fn rotate_active(
        &self,
        record: RefreshToken,
        device: DeviceInfo,
    ) -> DomainResult<RotationOutcome> {
        if !self.store.mark_revoked(record.id).await? {
            // A concurrent rotation already consumed this record. Benign:
            // the client double-submitted, no forensic response.
            debug!(user_id = %record.user_id, family_id = %record.family_id,
                "lost rotation race, rejecting as stale");
            return self.reject(record.user_id, &device, TokenError::StaleRotation);
        }

        let issued = self.issuer.issue(
            record.user_id,
            &record.role,
            Some(record.family_id),
            Some(record.secret_hash.clone()),
            device,
            record.display_name.clone(),
        )?;
        let successor = self.store.persist(issued.draft, &issued.refresh_secret).await?;
        self.store.update_last_used(record.id).await?;

        self.audit.emit(
            SecurityEvent::new(SecurityEventKind::TokenRotated, record.user_id)
                .with_family(record.family_id)
                .with_token(successor.id)
                .with_device(successor.device.clone()),
        );

        Ok(RotationOutcome {
            access_token: issued.access_token,
            refresh_secret: issued.refresh_secret,
            record: successor,
        })
    }

    /// Reuse path: the presented secret was valid once and has already been
    /// consumed - the canonical sign of credential theft. Revoke the whole
    /// chain and raise a security event.
    async fn handle_reuse(
        &self,
        record: RefreshToken,
        device: DeviceInfo,
    ) -> DomainResult<RotationOutcome> {
        let revoked = self
            .revocation
            .revoke_family(record.family_id, record.user_id)
            .await?;

        warn!(user_id = %record.user_id, family_id = %record.family_id, revoked,
            "refresh token reuse detected, chain revoked");
        self.audit.emit(
            SecurityEvent::new(SecurityEventKind::ReuseDetected, record.user_id)
                .with_family(record.family_id)
                .with_token(record.id)
                .with_device(device),
        );

        Err(TokenError::ReuseDetected.into())
    }

    fn reject(
        &self,
        user_id: Uuid,
        device: &DeviceInfo,
        reason: TokenError,
    ) -> DomainResult<RotationOutcome> {
        self.audit.emit(
            SecurityEvent::new(SecurityEventKind::RotationRejected, user_id)
                .with_device(device.clone())
                .with_detail(reason.to_string()),
        );
        Err(reason.into())
    }
}
