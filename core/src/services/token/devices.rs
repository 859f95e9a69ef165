//! Read-oriented view of a principal's active sessions.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshToken, SessionSummary};
use crate::errors::DomainResult;
use crate::repositories::TokenRepository;

use super::store::TokenStore;

/// Lists active sessions, one entry per rotation chain
pub struct DeviceRegistry<R: TokenRepository> {
    store: Arc<TokenStore<R>>,
}

impl<R: TokenRepository> DeviceRegistry<R> {
    pub fn new(store: Arc<TokenStore<R>>) -> Self {
        Self { store }
    }

    /// Active sessions of a principal, reduced to the newest record per
    /// chain (the current head), oldest chain first
    pub async fn list_active_sessions(&self, user_id: Uuid) -> DomainResult<Vec<SessionSummary>> {
        let records = self.store.list_active(user_id).await?;

        let mut heads: HashMap<Uuid, RefreshToken> = HashMap::new();
        for record in records {
            match heads.get(&record.family_id) {
                Some(existing) if existing.created_at >= record.created_at => {}
                _ => {
                    heads.insert(record.family_id, record);
                }
            }
        }

        let mut summaries: Vec<SessionSummary> =
            heads.values().map(SessionSummary::from).collect();
        summaries.sort_by_key(|s| s.created_at);
        Ok(summaries)
    }
}
