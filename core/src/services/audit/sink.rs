//! Fire-and-forget delivery of security events to the audit trail.
//!
//! Emission is one-way message passing over a bounded channel with a
//! background consumer, so a slow or unavailable audit store can never
//! stall authentication. When the channel is full the event is dropped
//! with a warning rather than applying backpressure to the caller.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::entities::audit::SecurityEvent;
use crate::repositories::SecurityEventRepository;

/// Clonable handle for emitting security events
#[derive(Clone)]
pub struct AuditSink {
    tx: Option<mpsc::Sender<SecurityEvent>>,
}

impl AuditSink {
    /// Spawns the consumer task and returns the emitting handle
    pub fn spawn<P>(repository: Arc<P>, capacity: usize) -> Self
    where
        P: SecurityEventRepository + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<SecurityEvent>(capacity.max(1));

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Err(e) = repository.record(&event).await {
                    warn!(kind = event.kind.as_str(), "failed to record security event: {e}");
                }
            }
        });

        Self { tx: Some(tx) }
    }

    /// A sink that silently discards everything (tests, tooling)
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Emit an event without waiting
    ///
    /// Never blocks and never fails the caller.
    pub fn emit(&self, event: SecurityEvent) {
        if let Some(tx) = &self.tx {
            if tx.try_send(event).is_err() {
                warn!("audit sink backlogged, dropping security event");
            }
        }
    }
}
