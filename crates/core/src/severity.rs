//! Severity classification for threshold violations.
//!
//! Whether a value is a violation at all is decided by the resolved
//! [`ThresholdRange`](crate::thresholds::ThresholdRange). How bad it is comes
//! from the absolute danger cutoffs below, which do not move with the range.

use serde::{Deserialize, Serialize};

use crate::sensor::Sensor;

const TEMPERATURE_CRITICAL_LOW: f64 = 15.0;
const TEMPERATURE_CRITICAL_HIGH: f64 = 35.0;
const LIGHT_CRITICAL_LOW: f64 = 10.0;
const HUMIDITY_CRITICAL_LOW: f64 = 20.0;
const HUMIDITY_CRITICAL_HIGH: f64 = 90.0;
const AIR_QUALITY_CRITICAL_HIGH: f64 = 500.0;
const MOISTURE_CRITICAL_LOW: f64 = 10.0;
const MOISTURE_CRITICAL_HIGH: f64 = 90.0;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Outside the configured range but not past the danger cutoff.
    Warning,
    /// Past the fixed danger cutoff for the sensor.
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }
}

/// Classify an out-of-range value.
///
/// `is_below_min` only matters for moisture, where the critical cutoff
/// depends on which side of the range the value fell.
pub fn classify(sensor: Sensor, value: f64, is_below_min: bool) -> Severity {
    let critical = match sensor {
        Sensor::Temperature => {
            value < TEMPERATURE_CRITICAL_LOW || value > TEMPERATURE_CRITICAL_HIGH
        }
        Sensor::Light => value < LIGHT_CRITICAL_LOW,
        Sensor::Humidity => value < HUMIDITY_CRITICAL_LOW || value > HUMIDITY_CRITICAL_HIGH,
        Sensor::AirQuality => value > AIR_QUALITY_CRITICAL_HIGH,
        Sensor::Moisture => {
            (is_below_min && value < MOISTURE_CRITICAL_LOW)
                || (!is_below_min && value > MOISTURE_CRITICAL_HIGH)
        }
    };

    if critical {
        Severity::Critical
    } else {
        Severity::Warning
    }
}
