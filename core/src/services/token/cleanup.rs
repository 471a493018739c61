//! Periodic deletion of dead refresh token records.
//!
//! Expired records are kept for a grace period before deletion so that a
//! late reuse attempt still hits a row and trips reuse detection.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Days past expiry before a record is eligible for deletion
    pub grace_period_days: i64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            grace_period_days: 7,
            enabled: true,
        }
    }
}

/// Summary of a cleanup cycle
#[derive(Debug, Clone, Default)]
pub struct CleanupResult {
    pub expired_tokens_deleted: usize,
}

/// Background service deleting long-expired refresh token records
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository> TokenCleanupService<R> {
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = Utc::now() - Duration::days(self.config.grace_period_days);
        let deleted = self.repository.delete_expired_before(cutoff).await?;
        if deleted > 0 {
            info!(deleted, "deleted expired refresh token records");
        }

        Ok(CleanupResult {
            expired_tokens_deleted: deleted,
        })
    }

    /// Start the cleanup service as a background task.
    ///
    /// Spawns a tokio task that runs cleanup at the configured interval.
    /// A failed cycle is logged and the loop keeps running.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "token cleanup service started"
            );

            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so startup is quiet.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!("token cleanup cycle failed: {}", e);
                }
            }
        });
    }
}
