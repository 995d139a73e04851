//! Trace-log subscriber for feed events.

use tokio::sync::broadcast;

use crate::bus::{FeedEventKind, MonitorEvent};

/// Writes every [`MonitorEvent`] to the trace log at a level matching its
/// outcome.
pub struct FeedLogger;

impl FeedLogger {
    /// Consume events until the bus is dropped.
    pub async fn run(mut receiver: broadcast::Receiver<MonitorEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => Self::log(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Feed logger fell behind, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, feed logger exiting");
                    break;
                }
            }
        }
    }

    fn log(event: &MonitorEvent) {
        let generation = event.generation;
        match event.kind {
            FeedEventKind::Refreshed => {
                tracing::info!(generation, payload = %event.payload, "Notification feed refreshed")
            }
            FeedEventKind::RefreshFailed => {
                tracing::warn!(
                    generation,
                    payload = %event.payload,
                    "Notification feed refresh failed"
                )
            }
            FeedEventKind::RunSuperseded => {
                tracing::debug!(
                    generation,
                    payload = %event.payload,
                    "Discarded superseded refresh run"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bus::EventBus;

    #[tokio::test]
    async fn exits_when_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(FeedLogger::run(bus.subscribe()));

        bus.publish(MonitorEvent::new(FeedEventKind::Refreshed, 1));
        bus.publish(MonitorEvent::new(FeedEventKind::RunSuperseded, 2));
        drop(bus);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn survives_lagging() {
        let bus = EventBus::new(1);
        let rx = bus.subscribe();
        for generation in 1..=5 {
            bus.publish(MonitorEvent::new(FeedEventKind::RefreshFailed, generation));
        }
        drop(bus);

        tokio::time::timeout(Duration::from_secs(5), FeedLogger::run(rx))
            .await
            .unwrap();
    }
}
