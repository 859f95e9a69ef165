//! Durable view over refresh-token records.
//!
//! `TokenStore` composes the repository with the secret hasher: raw secrets
//! are hashed here on write and verified here on lookup, so the repository
//! layer only ever sees digests. Because digests are salted there is no
//! hash-indexed lookup; matching scans the principal's (bounded, small)
//! candidate set and verifies against each.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, SessionDraft};
use crate::errors::DomainResult;
use crate::repositories::TokenRepository;
use crate::services::crypto::SecretHasher;

/// Store facade combining persistence with secret hashing
pub struct TokenStore<R: TokenRepository> {
    repository: Arc<R>,
    hasher: SecretHasher,
}

impl<R: TokenRepository> TokenStore<R> {
    pub fn new(repository: Arc<R>, hasher: SecretHasher) -> Self {
        Self { repository, hasher }
    }

    /// Hashes the raw secret and persists the drafted record
    pub async fn persist(&self, draft: SessionDraft, raw_secret: &str) -> DomainResult<RefreshToken> {
        let secret_hash = self.hasher.hash(raw_secret).await?;
        let record = RefreshToken::from_draft(draft, secret_hash);
        self.repository.save(record).await
    }

    /// Finds the active record of `user_id` whose digest verifies against
    /// `raw_secret` (active = not revoked, not expired)
    pub async fn find_active_match(
        &self,
        user_id: Uuid,
        raw_secret: &str,
    ) -> DomainResult<Option<RefreshToken>> {
        let candidates = self.repository.find_active_by_user(user_id, Utc::now()).await?;
        self.verify_against(candidates, raw_secret).await
    }

    /// Same search across *all* of the principal's records regardless of
    /// lifecycle state; used only for reuse forensics
    pub async fn find_any_match(
        &self,
        user_id: Uuid,
        raw_secret: &str,
    ) -> DomainResult<Option<RefreshToken>> {
        let candidates = self.repository.find_all_by_user(user_id).await?;
        self.verify_against(candidates, raw_secret).await
    }

    /// Conditional revoke; true only when this call made the transition
    pub async fn mark_revoked(&self, id: Uuid) -> DomainResult<bool> {
        self.repository.mark_revoked(id, Utc::now()).await
    }

    /// Revokes every active record in a chain, returning the count
    pub async fn revoke_family(&self, family_id: Uuid) -> DomainResult<usize> {
        self.repository.revoke_family(family_id, Utc::now()).await
    }

    /// Stamps `last_used_at` with the current time
    pub async fn update_last_used(&self, id: Uuid) -> DomainResult<()> {
        self.repository.update_last_used(id, Utc::now()).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<RefreshToken>> {
        self.repository.find_by_id(id).await
    }

    /// All currently-active records of a principal
    pub async fn list_active(&self, user_id: Uuid) -> DomainResult<Vec<RefreshToken>> {
        self.repository.find_active_by_user(user_id, Utc::now()).await
    }

    async fn verify_against(
        &self,
        candidates: Vec<RefreshToken>,
        raw_secret: &str,
    ) -> DomainResult<Option<RefreshToken>> {
        for record in candidates {
            if self.hasher.verify(raw_secret, &record.secret_hash).await? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
