//! Capturing security event repository for tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::audit::{SecurityEvent, SecurityEventKind};
use crate::errors::DomainError;

use super::r#trait::SecurityEventRepository;

/// Records every event in memory for later inspection
#[derive(Default)]
pub struct MockSecurityEventRepository {
    events: Arc<RwLock<Vec<SecurityEvent>>>,
}

impl MockSecurityEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub async fn recorded(&self) -> Vec<SecurityEvent> {
        self.events.read().await.clone()
    }

    /// Events of one kind, in arrival order
    pub async fn recorded_of_kind(&self, kind: SecurityEventKind) -> Vec<SecurityEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SecurityEventRepository for MockSecurityEventRepository {
    async fn record(&self, event: &SecurityEvent) -> Result<(), DomainError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
