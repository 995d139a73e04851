//! Plantwatch in-process event bus.
//!
//! The notification engine itself is stateless and never publishes anything.
//! Whoever drives a run (the feed coordinator) announces the outcome here
//! once the run has finished:
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`MonitorEvent`]: one lifecycle event, tagged with a [`FeedEventKind`].
//! - [`FeedLogger`]: subscriber that writes every event to the trace log.

pub mod bus;
pub mod logger;

pub use bus::{EventBus, FeedEventKind, MonitorEvent};
pub use logger::FeedLogger;
