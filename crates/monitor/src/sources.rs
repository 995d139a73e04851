//! Data sources the notification engine pulls from.
//!
//! Each trait covers one resource of the garden backend. The engine only
//! sees these traits, so a run can be driven by the HTTP client in
//! production and by [`StaticGarden`](crate::memory::StaticGarden) in tests.

use async_trait::async_trait;
use plantwatch_core::plant::Plant;
use plantwatch_core::snapshot::SensorSnapshot;
use plantwatch_core::thresholds::SystemThresholds;
use plantwatch_core::zone::Zone;

use crate::error::FetchError;

/// Lists the plants growing in a zone.
#[async_trait]
pub trait ZoneCatalog: Send + Sync {
    async fn plants(&self, zone: Zone) -> Result<Vec<Plant>, FetchError>;
}

/// Returns the latest sensor snapshot for a zone.
#[async_trait]
pub trait SensorSnapshotSource: Send + Sync {
    /// `Ok(None)` means the zone has not reported yet; it is not an error.
    async fn latest(&self, zone: Zone) -> Result<Option<SensorSnapshot>, FetchError>;
}

/// Returns the system-wide default threshold ranges.
#[async_trait]
pub trait SystemThresholdSource: Send + Sync {
    async fn system_thresholds(&self) -> Result<SystemThresholds, FetchError>;
}
