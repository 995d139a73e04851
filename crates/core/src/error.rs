use crate::sensor::Sensor;
use crate::types::PlantId;

/// Plant configuration errors raised while resolving thresholds.
///
/// These are always scoped to a single plant + sensor pair; the engine skips
/// that sensor for that plant and carries on with the rest of the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Plant {plant_id} has no {sensor} threshold configured")]
    MissingThreshold { plant_id: PlantId, sensor: Sensor },

    #[error("Plant {plant_id} has an invalid {sensor} threshold: min {min} must be below max {max}")]
    InvalidThreshold {
        plant_id: PlantId,
        sensor: Sensor,
        min: f64,
        max: f64,
    },
}
