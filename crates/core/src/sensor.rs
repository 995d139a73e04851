//! Sensor channel names, display labels and units.
//!
//! These are the canonical channel identifiers used in plant threshold
//! configuration, sensor snapshots and generated notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single sensor channel evaluated by the notification engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sensor {
    Temperature,
    Humidity,
    Light,
    AirQuality,
    /// Per-pin soil moisture, as opposed to the zone-wide channels above.
    Moisture,
}

impl Sensor {
    /// Zone-wide channels, in the order the engine evaluates them.
    pub const ENVIRONMENTAL: [Sensor; 4] = [
        Sensor::Light,
        Sensor::Temperature,
        Sensor::AirQuality,
        Sensor::Humidity,
    ];

    /// Wire identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Sensor::Temperature => "temperature",
            Sensor::Humidity => "humidity",
            Sensor::Light => "light",
            Sensor::AirQuality => "airQuality",
            Sensor::Moisture => "moisture",
        }
    }

    /// Human-readable label used in notification titles and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Sensor::Temperature => "Temperature",
            Sensor::Humidity => "Humidity",
            Sensor::Light => "Light",
            Sensor::AirQuality => "Air Quality",
            Sensor::Moisture => "Soil Moisture",
        }
    }

    /// Unit suffix appended directly after a formatted value.
    pub fn unit(self) -> &'static str {
        match self {
            Sensor::Temperature => "°C",
            Sensor::Humidity | Sensor::Moisture => "%",
            Sensor::Light => " lux",
            Sensor::AirQuality => " ppm",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
