//! No-op security event repository for deployments without an audit store.

use async_trait::async_trait;

use crate::domain::entities::audit::SecurityEvent;
use crate::errors::DomainError;

use super::r#trait::SecurityEventRepository;

/// Discards every event
#[derive(Debug, Default, Clone)]
pub struct NoOpSecurityEventRepository;

impl NoOpSecurityEventRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecurityEventRepository for NoOpSecurityEventRepository {
    async fn record(&self, _event: &SecurityEvent) -> Result<(), DomainError> {
        Ok(())
    }
}
