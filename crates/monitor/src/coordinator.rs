//! Publishes engine results and arbitrates between overlapping runs.
//!
//! Each call to [`FeedCoordinator::refresh`] is tagged with a generation
//! number when it starts. When it completes, its result is applied only if
//! no newer run has started in the meantime; otherwise it is discarded. A
//! failed run never replaces the last successful feed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use plantwatch_core::types::Timestamp;
use plantwatch_events::{EventBus, FeedEventKind, MonitorEvent};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::engine::{EvaluationReport, NotificationEngine};
use crate::error::MonitorError;

/// What started a refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshTrigger {
    /// A user asked for fresh data.
    Manual,
    /// The refresh scheduler fired.
    Periodic,
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshTrigger::Manual => f.write_str("manual"),
            RefreshTrigger::Periodic => f.write_str("periodic"),
        }
    }
}

/// Result of a refresh that did not fail.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// The run's report is now the published feed.
    Applied(Arc<EvaluationReport>),
    /// A newer run started before this one finished; its result was dropped.
    Superseded { generation: u64, latest: u64 },
}

/// Snapshot of the published feed.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    /// Latest successful report, if any run has succeeded yet.
    pub report: Option<Arc<EvaluationReport>>,
    /// Generation that produced `report`.
    pub generation: u64,
    /// Error from the most recent failed run, cleared on the next success.
    pub last_error: Option<String>,
    pub last_attempt_at: Option<Timestamp>,
}

pub struct FeedCoordinator {
    engine: NotificationEngine,
    bus: Arc<EventBus>,
    started: AtomicU64,
    state: RwLock<FeedState>,
}

impl FeedCoordinator {
    pub fn new(engine: NotificationEngine, bus: Arc<EventBus>) -> Self {
        Self {
            engine,
            bus,
            started: AtomicU64::new(0),
            state: RwLock::new(FeedState::default()),
        }
    }

    /// Run the engine once and publish the result if this run is still the
    /// newest when it finishes.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> Result<RefreshOutcome, MonitorError> {
        let generation = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(generation, %trigger, "Starting notification refresh");

        let result = self.engine.run().await;

        let mut state = self.state.write().await;
        let latest = self.started.load(Ordering::SeqCst);
        if latest != generation {
            tracing::debug!(generation, latest, "Refresh superseded by a newer run");
            self.bus.publish(
                MonitorEvent::new(FeedEventKind::RunSuperseded, generation)
                    .with_payload(serde_json::json!({ "latest": latest })),
            );
            return Ok(RefreshOutcome::Superseded { generation, latest });
        }

        state.last_attempt_at = Some(Utc::now());

        match result {
            Ok(report) => {
                let report = Arc::new(report);
                state.report = Some(Arc::clone(&report));
                state.generation = generation;
                state.last_error = None;
                drop(state);

                self.bus.publish(
                    MonitorEvent::new(FeedEventKind::Refreshed, generation)
                        .with_payload(serde_json::json!({
                            "trigger": trigger,
                            "stats": report.stats,
                            "thresholdsDefaulted": report.thresholds_defaulted,
                        })),
                );
                Ok(RefreshOutcome::Applied(report))
            }
            Err(e) => {
                state.last_error = Some(e.to_string());
                drop(state);

                self.bus.publish(
                    MonitorEvent::new(FeedEventKind::RefreshFailed, generation)
                        .with_payload(serde_json::json!({
                            "trigger": trigger,
                            "error": e.to_string(),
                        })),
                );
                Err(e)
            }
        }
    }

    /// The currently published feed.
    pub async fn current(&self) -> FeedState {
        self.state.read().await.clone()
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
