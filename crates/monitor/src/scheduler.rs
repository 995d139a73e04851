//! Periodic feed refresh.
//!
//! [`RefreshScheduler`] runs as a background task, asking the
//! [`FeedCoordinator`] for a new run on a fixed interval. The first tick
//! fires immediately so the feed is populated at startup.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::coordinator::{FeedCoordinator, RefreshOutcome, RefreshTrigger};

/// Default time between periodic refreshes: 10 minutes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(600);

pub struct RefreshScheduler {
    coordinator: Arc<FeedCoordinator>,
    interval: Duration,
}

impl RefreshScheduler {
    pub fn new(coordinator: Arc<FeedCoordinator>, interval: Duration) -> Self {
        Self {
            coordinator,
            interval,
        }
    }

    /// Run the refresh loop until `cancel` is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Refresh scheduler started"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {}
            }

            // A run can take up to the fetch timeout; stop waiting on cancel.
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Abandoning in-flight refresh");
                    break;
                }
                result = self.coordinator.refresh(RefreshTrigger::Periodic) => match result {
                    Ok(RefreshOutcome::Applied(report)) => {
                        tracing::debug!(total = report.stats.total, "Periodic refresh applied");
                    }
                    Ok(RefreshOutcome::Superseded { generation, latest }) => {
                        tracing::debug!(generation, latest, "Periodic refresh superseded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Periodic refresh failed");
                    }
                },
            }
        }

        tracing::info!("Refresh scheduler stopping");
    }
}
