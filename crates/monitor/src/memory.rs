//! In-memory garden used by tests and local demos.
//!
//! [`StaticGarden`] serves fixed data through all three source traits. It can
//! be told to fail individual resources or stall snapshot fetches, which is
//! how the engine's degradation paths are exercised without a network.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use plantwatch_core::plant::Plant;
use plantwatch_core::snapshot::SensorSnapshot;
use plantwatch_core::thresholds::SystemThresholds;
use plantwatch_core::zone::Zone;

use crate::error::FetchError;
use crate::sources::{SensorSnapshotSource, SystemThresholdSource, ZoneCatalog};

#[derive(Debug, Clone, Default)]
pub struct StaticGarden {
    plants: HashMap<Zone, Vec<Plant>>,
    snapshots: HashMap<Zone, SensorSnapshot>,
    system_thresholds: SystemThresholds,
    failing_plants: HashSet<Zone>,
    failing_snapshots: HashSet<Zone>,
    failing_thresholds: bool,
    snapshot_delays: HashMap<Zone, Duration>,
}

impl StaticGarden {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plant to the zone it declares.
    pub fn with_plant(mut self, plant: Plant) -> Self {
        self.plants.entry(plant.zone).or_default().push(plant);
        self
    }

    /// Store `snapshot` as the latest for its zone, replacing any previous one.
    pub fn with_snapshot(mut self, snapshot: SensorSnapshot) -> Self {
        self.snapshots.insert(snapshot.zone_id, snapshot);
        self
    }

    pub fn with_system_thresholds(mut self, thresholds: SystemThresholds) -> Self {
        self.system_thresholds = thresholds;
        self
    }

    pub fn fail_plants(mut self, zone: Zone) -> Self {
        self.failing_plants.insert(zone);
        self
    }

    pub fn fail_snapshot(mut self, zone: Zone) -> Self {
        self.failing_snapshots.insert(zone);
        self
    }

    pub fn fail_thresholds(mut self) -> Self {
        self.failing_thresholds = true;
        self
    }

    /// Make snapshot fetches for `zone` sleep for `delay` before answering.
    pub fn with_snapshot_delay(mut self, zone: Zone, delay: Duration) -> Self {
        self.snapshot_delays.insert(zone, delay);
        self
    }

    async fn stall(&self, zone: Zone) {
        if let Some(delay) = self.snapshot_delays.get(&zone) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl ZoneCatalog for StaticGarden {
    async fn plants(&self, zone: Zone) -> Result<Vec<Plant>, FetchError> {
        if self.failing_plants.contains(&zone) {
            return Err(FetchError::Unavailable(format!("plant catalog for {zone}")));
        }
        Ok(self.plants.get(&zone).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl SensorSnapshotSource for StaticGarden {
    async fn latest(&self, zone: Zone) -> Result<Option<SensorSnapshot>, FetchError> {
        self.stall(zone).await;
        if self.failing_snapshots.contains(&zone) {
            return Err(FetchError::Unavailable(format!("sensor snapshot for {zone}")));
        }
        Ok(self.snapshots.get(&zone).cloned())
    }
}

#[async_trait]
impl SystemThresholdSource for StaticGarden {
    async fn system_thresholds(&self) -> Result<SystemThresholds, FetchError> {
        if self.failing_thresholds {
            return Err(FetchError::Unavailable("system thresholds".to_string()));
        }
        Ok(self.system_thresholds)
    }
}
