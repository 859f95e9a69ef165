mod rotation_tests;
mod service_tests;

use std::sync::Arc;
use std::time::Duration;

use dp_shared::config::HashingConfig;

use crate::domain::entities::audit::SecurityEvent;
use crate::repositories::{InMemoryTokenRepository, MockSecurityEventRepository};
use crate::services::audit::AuditSink;
use crate::services::crypto::SecretHasher;
use crate::services::token::{SessionService, TokenServiceConfig};

/// Hasher with minimal cost parameters; these tests exercise lifecycle
/// behavior, not hash strength.
pub(crate) fn fast_hasher() -> SecretHasher {
    SecretHasher::new(&HashingConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
        max_concurrent: 8,
    })
    .unwrap()
}

pub(crate) struct Harness {
    pub repo: Arc<InMemoryTokenRepository>,
    pub audit_repo: Arc<MockSecurityEventRepository>,
    pub service: SessionService<InMemoryTokenRepository>,
}

/// Full service wired over the in-memory repository and a capturing audit
/// trail. Must be called from within a tokio runtime.
pub(crate) fn harness() -> Harness {
    let repo = Arc::new(InMemoryTokenRepository::new());
    let audit_repo = Arc::new(MockSecurityEventRepository::new());
    let audit = AuditSink::spawn(Arc::clone(&audit_repo), 64);
    let service = SessionService::new(
        Arc::clone(&repo),
        fast_hasher(),
        TokenServiceConfig::default(),
        audit,
    );

    Harness {
        repo,
        audit_repo,
        service,
    }
}

/// Audit delivery is asynchronous; poll until `count` events arrived
pub(crate) async fn wait_for_events(
    repo: &MockSecurityEventRepository,
    count: usize,
) -> Vec<SecurityEvent> {
    for _ in 0..200 {
        let events = repo.recorded().await;
        if events.len() >= count {
            return events;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    repo.recorded().await
}
