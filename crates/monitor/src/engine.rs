//! One evaluation run of the notification engine.
//!
//! A run is stateless: it fetches everything it needs, evaluates it, and
//! returns an [`EvaluationReport`]. Nothing survives into the next run.
//!
//! Phases:
//!
//! 1. Fetch system thresholds, falling back to [`SystemThresholds::default`].
//! 2. Evaluate the four zones concurrently, each into its own sub-list.
//! 3. Merge the sub-lists in zone order.
//! 4. De-duplicate by semantic key.
//! 5. Sort newest first.
//! 6. Aggregate stats.
//!
//! Every fetch is bounded by the configured timeout. A failed or timed-out
//! fetch degrades only the resource it was for; the run as a whole fails
//! only when every fetch failed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use plantwatch_core::dedup::dedupe;
use plantwatch_core::notification::{builder, sort_newest_first, Notification};
use plantwatch_core::plant::Plant;
use plantwatch_core::sensor::Sensor;
use plantwatch_core::snapshot::SensorSnapshot;
use plantwatch_core::stats::NotificationStats;
use plantwatch_core::thresholds::{self, SystemThresholds};
use plantwatch_core::types::Timestamp;
use plantwatch_core::zone::Zone;
use serde::Serialize;

use crate::error::{FetchError, MonitorError};
use crate::sources::{SensorSnapshotSource, SystemThresholdSource, ZoneCatalog};

/// Default upper bound for a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Output of a run, consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    /// De-duplicated, newest first.
    pub notifications: Vec<Notification>,
    pub stats: NotificationStats,
    /// Display defaults; never used to evaluate plants.
    pub system_thresholds: SystemThresholds,
    /// `true` when the threshold source failed and defaults were substituted.
    pub thresholds_defaulted: bool,
    pub evaluated_at: Timestamp,
}

/// What happened to a single zone during a run.
struct ZoneOutcome {
    notifications: Vec<Notification>,
    catalog_failed: Option<FetchError>,
}

impl ZoneOutcome {
    fn evaluated(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            catalog_failed: None,
        }
    }

    fn catalog_failed(error: FetchError) -> Self {
        Self {
            notifications: Vec::new(),
            catalog_failed: Some(error),
        }
    }
}

/// Evaluates plant configuration against the latest sensor snapshots.
#[derive(Clone)]
pub struct NotificationEngine {
    catalog: Arc<dyn ZoneCatalog>,
    snapshots: Arc<dyn SensorSnapshotSource>,
    thresholds: Arc<dyn SystemThresholdSource>,
    fetch_timeout: Duration,
}

impl NotificationEngine {
    pub fn new(
        catalog: Arc<dyn ZoneCatalog>,
        snapshots: Arc<dyn SensorSnapshotSource>,
        thresholds: Arc<dyn SystemThresholdSource>,
    ) -> Self {
        Self {
            catalog,
            snapshots,
            thresholds,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Build an engine whose three sources are the same object, e.g. an
    /// [`HttpGardenClient`](crate::client::HttpGardenClient).
    pub fn from_source<S>(source: Arc<S>) -> Self
    where
        S: ZoneCatalog + SensorSnapshotSource + SystemThresholdSource + 'static,
    {
        Self::new(source.clone(), source.clone(), source)
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Run a full evaluation stamped with the current time.
    pub async fn run(&self) -> Result<EvaluationReport, MonitorError> {
        self.run_at(Utc::now()).await
    }

    /// Run a full evaluation with an explicit evaluation time.
    ///
    /// `now` stamps the zone-wide "no sensor data" notifications and the
    /// report; everything else carries the snapshot's own timestamp. Two runs
    /// over the same data with the same `now` differ only in notification ids.
    pub async fn run_at(&self, now: Timestamp) -> Result<EvaluationReport, MonitorError> {
        let (system_thresholds, threshold_error) = match self
            .bounded("system thresholds", self.thresholds.system_thresholds())
            .await
        {
            Ok(t) => (t, None),
            Err(e) => {
                tracing::warn!(error = %e, "Threshold fetch failed, using default ranges");
                (SystemThresholds::default(), Some(e))
            }
        };

        let outcomes = join_all(Zone::ALL.map(|zone| self.evaluate_zone(zone, now))).await;

        if threshold_error.is_some() && outcomes.iter().all(|o| o.catalog_failed.is_some()) {
            let last = outcomes
                .iter()
                .rev()
                .find_map(|o| o.catalog_failed.as_ref())
                .map(ToString::to_string)
                .unwrap_or_default();
            tracing::error!(error = %last, "Every garden fetch failed");
            return Err(MonitorError::SourcesUnavailable(last));
        }

        let merged: Vec<Notification> = outcomes
            .into_iter()
            .flat_map(|o| o.notifications)
            .collect();
        let merged_count = merged.len();

        let mut notifications = dedupe(merged);
        sort_newest_first(&mut notifications);
        let stats = NotificationStats::aggregate(&notifications);

        tracing::info!(
            total = stats.total,
            critical = stats.critical,
            warning = stats.warning,
            duplicates = merged_count - notifications.len(),
            "Evaluation run complete"
        );

        Ok(EvaluationReport {
            notifications,
            stats,
            system_thresholds,
            thresholds_defaulted: threshold_error.is_some(),
            evaluated_at: now,
        })
    }

    async fn evaluate_zone(&self, zone: Zone, now: Timestamp) -> ZoneOutcome {
        let resource = format!("plants for {zone}");
        let plants = match self.bounded(&resource, self.catalog.plants(zone)).await {
            Ok(plants) => plants,
            Err(e) => {
                tracing::warn!(%zone, error = %e, "Plant catalog fetch failed, skipping zone");
                return ZoneOutcome::catalog_failed(e);
            }
        };

        if plants.is_empty() {
            tracing::debug!(%zone, "No plants in zone");
            return ZoneOutcome::evaluated(Vec::new());
        }

        let resource = format!("sensor snapshot for {zone}");
        let snapshot = match self.bounded(&resource, self.snapshots.latest(zone)).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(%zone, error = %e, "Snapshot fetch failed, treating as absent");
                None
            }
        };

        let Some(snapshot) = snapshot else {
            tracing::info!(%zone, plants = plants.len(), "No sensor data for zone");
            let notifications = plants
                .iter()
                .map(|plant| builder::no_sensor_data(zone, plant, now))
                .collect();
            return ZoneOutcome::evaluated(notifications);
        };

        if snapshot.zone_id != zone {
            tracing::warn!(
                %zone,
                snapshot_zone = %snapshot.zone_id,
                "Snapshot reports a different zone than requested"
            );
        }

        let mut notifications = Vec::new();
        for plant in &plants {
            evaluate_plant(zone, plant, &snapshot, &mut notifications);
        }

        tracing::debug!(%zone, count = notifications.len(), "Zone evaluated");
        ZoneOutcome::evaluated(notifications)
    }

    /// Apply the fetch timeout to `fut`, mapping an elapsed timer to
    /// [`FetchError::Timeout`].
    async fn bounded<T>(
        &self,
        resource: &str,
        fut: impl Future<Output = Result<T, FetchError>>,
    ) -> Result<T, FetchError> {
        match tokio::time::timeout(self.fetch_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                resource: resource.to_string(),
                after: self.fetch_timeout,
            }),
        }
    }
}

/// Check every channel of one plant against the zone snapshot.
fn evaluate_plant(
    zone: Zone,
    plant: &Plant,
    snapshot: &SensorSnapshot,
    out: &mut Vec<Notification>,
) {
    for sensor in Sensor::ENVIRONMENTAL {
        let Some(value) = usable_reading(zone, plant, sensor, snapshot.reading(sensor)) else {
            continue;
        };
        let range = match thresholds::resolve(plant, sensor) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!(%zone, plant_id = %plant.id, error = %e, "Skipping sensor");
                continue;
            }
        };
        if !range.contains(value) {
            out.push(builder::environmental(
                sensor,
                value,
                range,
                zone,
                plant,
                snapshot.timestamp,
            ));
        }
    }

    let pin = plant.moisture_pin;
    if !plant.has_known_pin() {
        tracing::warn!(%zone, plant_id = %plant.id, pin, "Plant uses an unrecognised moisture pin");
    }

    let Some(value) = snapshot.moisture_for_pin(pin) else {
        out.push(builder::no_data(zone, plant, pin, snapshot.timestamp));
        return;
    };
    let Some(value) = usable_reading(zone, plant, Sensor::Moisture, Some(value)) else {
        return;
    };
    match thresholds::resolve(plant, Sensor::Moisture) {
        Ok(range) if !range.contains(value) => {
            out.push(builder::moisture(
                value,
                range,
                zone,
                plant,
                pin,
                snapshot.timestamp,
            ));
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(%zone, plant_id = %plant.id, error = %e, "Skipping sensor");
        }
    }
}

/// Drop missing and non-finite readings; neither can be compared to a range.
fn usable_reading(zone: Zone, plant: &Plant, sensor: Sensor, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() => Some(v),
        Some(v) => {
            tracing::warn!(
                %zone,
                plant_id = %plant.id,
                %sensor,
                value = v,
                "Ignoring non-finite reading"
            );
            None
        }
        None => {
            tracing::debug!(%zone, %sensor, "Snapshot has no reading for sensor");
            None
        }
    }
}
