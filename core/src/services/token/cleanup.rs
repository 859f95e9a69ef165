//! Retention sweep for long-expired refresh-token records.
//!
//! Request-path lookups never delete anything; this background task
//! physically purges records that expired longer than the grace period
//! ago, keeping the store compact without disturbing reuse forensics on
//! recent chains.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for the retention sweep
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// How long expired records are kept before deletion (in days)
    pub grace_period_days: i64,
    /// Whether the sweep is enabled
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // run every hour
            grace_period_days: 7,   // keep expired records for forensics
            enabled: true,
        }
    }
}

/// Background service purging long-expired records
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Runs a single sweep cycle
    pub async fn run_cleanup(&self) -> Result<usize, DomainError> {
        if !self.config.enabled {
            return Ok(0);
        }

        let cutoff = Utc::now() - Duration::days(self.config.grace_period_days);
        let deleted = self.repository.delete_expired_before(cutoff).await?;

        if deleted > 0 {
            info!(deleted, "purged expired refresh-token records");
        }

        Ok(deleted)
    }

    /// Spawns the sweep as a periodic background task
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("token cleanup is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "token cleanup started, running every {} seconds",
                self.config.interval_seconds
            );

            let mut timer = tokio::time::interval(interval);

            loop {
                timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("token cleanup cycle failed: {e}");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::{DeviceInfo, RefreshToken, SessionDraft};
    use crate::repositories::InMemoryTokenRepository;
    use uuid::Uuid;

    fn record_expiring_at(expires_at: chrono::DateTime<Utc>) -> RefreshToken {
        let now = Utc::now();
        let mut record = RefreshToken::from_draft(
            SessionDraft {
                user_id: Uuid::new_v4(),
                role: "analyst".to_string(),
                family_id: Uuid::new_v4(),
                parent_hash: None,
                device: DeviceInfo::default(),
                display_name: None,
                created_at: now - Duration::days(30),
                expires_at: now,
            },
            "digest".to_string(),
        );
        record.expires_at = expires_at;
        record
    }

    #[tokio::test]
    async fn test_sweep_only_removes_past_grace_period() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        let long_gone = record_expiring_at(Utc::now() - Duration::days(30));
        let recently_expired = record_expiring_at(Utc::now() - Duration::days(1));
        let live = record_expiring_at(Utc::now() + Duration::days(7));

        repo.save(long_gone.clone()).await.unwrap();
        repo.save(recently_expired.clone()).await.unwrap();
        repo.save(live.clone()).await.unwrap();

        let service =
            TokenCleanupService::new(Arc::clone(&repo), TokenCleanupConfig::default());
        let deleted = service.run_cleanup().await.unwrap();

        assert_eq!(deleted, 1);
        assert!(repo.find_by_id(long_gone.id).await.unwrap().is_none());
        assert!(repo.find_by_id(recently_expired.id).await.unwrap().is_some());
        assert!(repo.find_by_id(live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_disabled_sweep_is_inert() {
        let repo = Arc::new(InMemoryTokenRepository::new());
        repo.save(record_expiring_at(Utc::now() - Duration::days(30)))
            .await
            .unwrap();

        let service = TokenCleanupService::new(
            Arc::clone(&repo),
            TokenCleanupConfig {
                enabled: false,
                ..TokenCleanupConfig::default()
            },
        );

        assert_eq!(service.run_cleanup().await.unwrap(), 0);
    }
}
