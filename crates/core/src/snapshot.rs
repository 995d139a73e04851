//! Latest sensor readings for a zone.

use serde::{Deserialize, Serialize};

use crate::sensor::Sensor;
use crate::types::{Pin, Timestamp};
use crate::zone::Zone;

/// The most recent batch of readings reported for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub zone_id: Zone,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub environment: EnvironmentalReadings,
    /// Soil moisture per probe pin, in reporting order.
    #[serde(default)]
    pub soil_moisture: Vec<SoilMoistureReading>,
}

/// Zone-wide readings. A channel the station did not report is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalReadings {
    pub humidity: Option<f64>,
    pub temperature: Option<f64>,
    pub light: Option<f64>,
    pub air_quality: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilMoistureReading {
    pub pin: Pin,
    pub moisture: f64,
}

impl SensorSnapshot {
    /// Reading for a zone-wide channel. Moisture is per pin, see
    /// [`moisture_for_pin`](Self::moisture_for_pin).
    pub fn reading(&self, sensor: Sensor) -> Option<f64> {
        match sensor {
            Sensor::Humidity => self.environment.humidity,
            Sensor::Temperature => self.environment.temperature,
            Sensor::Light => self.environment.light,
            Sensor::AirQuality => self.environment.air_quality,
            Sensor::Moisture => None,
        }
    }

    /// First moisture reading reported for `pin`.
    pub fn moisture_for_pin(&self, pin: Pin) -> Option<f64> {
        self.soil_moisture
            .iter()
            .find(|r| r.pin == pin)
            .map(|r| r.moisture)
    }
}
