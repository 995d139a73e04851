//! Broadcast hub for feed lifecycle events.
//!
//! One [`EventBus`] is created at startup and shared as `Arc<EventBus>`. The
//! feed coordinator publishes a [`MonitorEvent`] after every refresh run;
//! subscribers such as [`FeedLogger`](crate::FeedLogger) react to them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// What happened to a refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedEventKind {
    /// The run completed and its feed was published.
    #[serde(rename = "feed.refreshed")]
    Refreshed,
    /// The run failed; the previous feed stays in place.
    #[serde(rename = "feed.refresh_failed")]
    RefreshFailed,
    /// The run finished after a newer run had started and was discarded.
    #[serde(rename = "feed.run_superseded")]
    RunSuperseded,
}

impl FeedEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedEventKind::Refreshed => "feed.refreshed",
            FeedEventKind::RefreshFailed => "feed.refresh_failed",
            FeedEventKind::RunSuperseded => "feed.run_superseded",
        }
    }
}

impl fmt::Display for FeedEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feed lifecycle event for one refresh generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorEvent {
    #[serde(rename = "type")]
    pub kind: FeedEventKind,
    /// Generation number the coordinator assigned to the run.
    pub generation: u64,
    /// Event-specific details, an empty object by default.
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl MonitorEvent {
    pub fn new(kind: FeedEventKind, generation: u64) -> Self {
        Self {
            kind,
            generation,
            payload: serde_json::json!({}),
            timestamp: Utc::now(),
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out channel for [`MonitorEvent`]s.
///
/// A receiver that falls more than `capacity` events behind loses the oldest
/// ones and sees `RecvError::Lagged` on its next `recv`.
pub struct EventBus {
    sender: broadcast::Sender<MonitorEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send `event` to every current subscriber and return how many there
    /// were. Zero subscribers is not an error.
    pub fn publish(&self, event: MonitorEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
