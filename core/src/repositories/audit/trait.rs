//! Security event repository trait.

use async_trait::async_trait;

use crate::domain::entities::audit::SecurityEvent;
use crate::errors::DomainError;

/// Append-only sink for security events
///
/// Implementations must tolerate being called from a background consumer;
/// they never sit on the rotation critical path.
#[async_trait]
pub trait SecurityEventRepository: Send + Sync {
    /// Append a security event to the trail
    async fn record(&self, event: &SecurityEvent) -> Result<(), DomainError>;
}
