//! Explicit revocation of records and chains.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::audit::{SecurityEvent, SecurityEventKind};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::TokenRepository;
use crate::services::audit::AuditSink;

use super::store::TokenStore;

/// Revokes single records (logout) and whole chains (device removal,
/// reuse response)
pub struct RevocationService<R: TokenRepository> {
    store: Arc<TokenStore<R>>,
    audit: AuditSink,
}

impl<R: TokenRepository> Clone for RevocationService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            audit: self.audit.clone(),
        }
    }
}

impl<R: TokenRepository> RevocationService<R> {
    pub fn new(store: Arc<TokenStore<R>>, audit: AuditSink) -> Self {
        Self { store, audit }
    }

    /// Revokes the record matching a presented secret (logout)
    ///
    /// Returns whether a record was revoked; an unknown or already-revoked
    /// secret is not an error, so logout stays idempotent.
    pub async fn revoke_presented(&self, user_id: Uuid, raw_secret: &str) -> DomainResult<bool> {
        match self.store.find_active_match(user_id, raw_secret).await? {
            Some(record) => {
                let revoked = self.store.mark_revoked(record.id).await?;
                if revoked {
                    self.audit.emit(
                        SecurityEvent::new(SecurityEventKind::SessionRevoked, user_id)
                            .with_family(record.family_id)
                            .with_token(record.id),
                    );
                }
                Ok(revoked)
            }
            None => Ok(false),
        }
    }

    /// Revokes the chain a record belongs to, after checking the record is
    /// owned by the calling principal
    ///
    /// Foreign or unknown records report `NotFound` - ownership failures
    /// must not be distinguishable from missing records.
    pub async fn revoke_device(&self, user_id: Uuid, record_id: Uuid) -> DomainResult<usize> {
        let record = self
            .store
            .find_by_id(record_id)
            .await?
            .filter(|r| r.user_id == user_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "session".to_string(),
            })?;

        let count = self.revoke_family(record.family_id, user_id).await?;
        info!(user_id = %user_id, family_id = %record.family_id, count,
            "device session revoked");
        Ok(count)
    }

    /// Revokes every active record in a chain
    pub async fn revoke_family(&self, family_id: Uuid, user_id: Uuid) -> DomainResult<usize> {
        let count = self.store.revoke_family(family_id).await?;

        if count > 0 {
            self.audit.emit(
                SecurityEvent::new(SecurityEventKind::FamilyRevoked, user_id)
                    .with_family(family_id)
                    .with_detail(format!("{count} records revoked")),
            );
        }

        Ok(count)
    }
}
