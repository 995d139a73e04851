//! Plantwatch monitoring engine.
//!
//! Pulls plant configuration and sensor snapshots from the garden backend,
//! evaluates them with the pure logic in `plantwatch_core`, and publishes
//! the resulting notification feed.
//!
//! - [`sources`]: the three data source traits the engine depends on.
//! - [`client::HttpGardenClient`]: HTTP/JSON implementation of all three.
//! - [`memory::StaticGarden`]: in-memory implementation for tests and demos.
//! - [`engine::NotificationEngine`]: one stateless evaluation run.
//! - [`coordinator::FeedCoordinator`]: run supersession and the published feed.
//! - [`scheduler::RefreshScheduler`]: periodic refresh loop.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod memory;
pub mod scheduler;
pub mod sources;

pub use coordinator::{FeedCoordinator, RefreshOutcome, RefreshTrigger};
pub use engine::{EvaluationReport, NotificationEngine};
pub use error::{FetchError, MonitorError};
