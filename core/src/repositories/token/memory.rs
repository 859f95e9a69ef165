//! In-memory implementation of TokenRepository.
//!
//! Used by tests and by single-node deployments without a database. The
//! conditional-revoke contract is honored by performing the check and the
//! write under one write-lock acquisition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory token repository backed by a `RwLock`ed map
#[derive(Default)]
pub struct InMemoryTokenRepository {
    records: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
}

impl InMemoryTokenRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&token.id) {
            return Err(DomainError::Storage {
                message: format!("duplicate token id {}", token.id),
            });
        }

        records.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|t| t.user_id == user_id && t.revoked_at.is_none() && t.expires_at > now)
            .cloned()
            .collect())
    }

    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_revoked(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        // Check-and-set under a single write lock: this is the CAS the
        // rotation race depends on.
        let mut records = self.records.write().await;

        match records.get_mut(&id) {
            Some(token) if token.revoked_at.is_none() => {
                token.revoked_at = Some(at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_family(
        &self,
        family_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for token in records.values_mut() {
            if token.family_id == family_id && token.revoked_at.is_none() {
                token.revoked_at = Some(at);
                count += 1;
            }
        }

        Ok(count)
    }

    async fn update_last_used(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut records = self.records.write().await;

        if let Some(token) = records.get_mut(&id) {
            token.last_used_at = Some(at);
        }

        Ok(())
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, token| token.expires_at >= cutoff);

        Ok(initial_count - records.len())
    }
}
