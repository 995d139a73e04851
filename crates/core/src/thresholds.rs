//! Threshold ranges and per-sensor threshold resolution.
//!
//! Pure logic, no I/O. Which source a sensor's range comes from is fixed by
//! [`threshold_source`]: four channels honour the plant's own override while
//! humidity always uses a fixed constant, because plants carry no humidity
//! setting at all.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::plant::Plant;
use crate::sensor::Sensor;

/// Fixed humidity band applied to every plant.
pub const HUMIDITY_RANGE: ThresholdRange = ThresholdRange::new(40.0, 80.0);

/// A `[min, max]` band of normal values. Valid ranges have `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    pub min: f64,
    pub max: f64,
}

impl ThresholdRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `true` when `value` lies inside the band, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_below(&self, value: f64) -> bool {
        value < self.min
    }

    fn is_valid(&self) -> bool {
        self.min < self.max
    }
}

/// System-wide default ranges.
///
/// These are display defaults only; per-plant limits never fall back to them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemThresholds {
    pub light: ThresholdRange,
    pub temperature: ThresholdRange,
    pub air_quality: ThresholdRange,
}

impl Default for SystemThresholds {
    /// Substituted when the threshold source cannot be reached.
    fn default() -> Self {
        Self {
            light: ThresholdRange::new(0.0, 200.0),
            temperature: ThresholdRange::new(20.0, 30.0),
            air_quality: ThresholdRange::new(0.0, 100.0),
        }
    }
}

/// Where a sensor's effective range comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdSource {
    /// The plant's own `thresholds` entry for the sensor.
    PlantOverride,
    /// A constant shared by every plant.
    FixedConstant(ThresholdRange),
}

/// Precedence table: one row per sensor.
pub const fn threshold_source(sensor: Sensor) -> ThresholdSource {
    match sensor {
        Sensor::Moisture => ThresholdSource::PlantOverride,
        Sensor::Temperature => ThresholdSource::PlantOverride,
        Sensor::Light => ThresholdSource::PlantOverride,
        Sensor::AirQuality => ThresholdSource::PlantOverride,
        Sensor::Humidity => ThresholdSource::FixedConstant(HUMIDITY_RANGE),
    }
}

/// Resolve the effective range for `sensor` on `plant`.
///
/// Plant-override sensors have no system fallback: a missing or inverted
/// range is a configuration error the caller must absorb by skipping the
/// sensor for this plant.
pub fn resolve(plant: &Plant, sensor: Sensor) -> Result<ThresholdRange, CoreError> {
    match threshold_source(sensor) {
        ThresholdSource::FixedConstant(range) => Ok(range),
        ThresholdSource::PlantOverride => {
            let range =
                plant
                    .thresholds
                    .get(sensor)
                    .ok_or_else(|| CoreError::MissingThreshold {
                        plant_id: plant.id.clone(),
                        sensor,
                    })?;

            if !range.is_valid() {
                return Err(CoreError::InvalidThreshold {
                    plant_id: plant.id.clone(),
                    sensor,
                    min: range.min,
                    max: range.max,
                });
            }

            Ok(range)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
