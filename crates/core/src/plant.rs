//! Plant configuration as served by the zone catalog.

use serde::{Deserialize, Serialize};

use crate::sensor::Sensor;
use crate::thresholds::ThresholdRange;
use crate::types::{Pin, PlantId};
use crate::zone::Zone;

/// Pins a soil moisture probe can be wired to.
pub const MOISTURE_PINS: [Pin; 6] = [32, 33, 34, 35, 36, 39];

/// An individually tracked plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub zone: Zone,
    pub moisture_pin: Pin,
    #[serde(default)]
    pub thresholds: PlantThresholds,
}

impl Plant {
    /// Whether the plant's moisture pin is one of [`MOISTURE_PINS`].
    pub fn has_known_pin(&self) -> bool {
        MOISTURE_PINS.contains(&self.moisture_pin)
    }
}

/// Per-plant threshold overrides.
///
/// Every field is optional on the wire so a partially configured plant still
/// loads; a missing field only surfaces when that sensor is resolved. There is
/// deliberately no humidity field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<ThresholdRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ThresholdRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<ThresholdRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<ThresholdRange>,
}

impl PlantThresholds {
    /// The configured override for `sensor`, if any. Always `None` for humidity.
    pub fn get(&self, sensor: Sensor) -> Option<ThresholdRange> {
        match sensor {
            Sensor::Moisture => self.moisture,
            Sensor::Temperature => self.temperature,
            Sensor::Light => self.light,
            Sensor::AirQuality => self.air_quality,
            Sensor::Humidity => None,
        }
    }
}
