//! Pure constructors for [`Notification`] records.
//!
//! Every field except `id` is a deterministic function of the arguments. The
//! id is a UUIDv7, so it embeds the wall clock and is unique per call.

use uuid::Uuid;

use super::{Notification, NotificationKind, NotificationType};
use crate::plant::Plant;
use crate::sensor::Sensor;
use crate::severity::{self, Severity};
use crate::thresholds::ThresholdRange;
use crate::types::{Pin, Timestamp};
use crate::zone::Zone;

/// Placeholder range attached to the "no data" variants.
pub const NO_DATA_RANGE: ThresholdRange = ThresholdRange::new(0.0, 100.0);

/// A zone-wide reading outside its range.
pub fn environmental(
    sensor: Sensor,
    value: f64,
    range: ThresholdRange,
    zone: Zone,
    plant: &Plant,
    timestamp: Timestamp,
) -> Notification {
    violation(
        NotificationType::Environmental,
        sensor,
        value,
        range,
        zone,
        plant,
        None,
        timestamp,
    )
}

/// A soil moisture reading outside the plant's moisture range.
pub fn moisture(
    value: f64,
    range: ThresholdRange,
    zone: Zone,
    plant: &Plant,
    pin: Pin,
    timestamp: Timestamp,
) -> Notification {
    violation(
        NotificationType::Moisture,
        Sensor::Moisture,
        value,
        range,
        zone,
        plant,
        Some(pin),
        timestamp,
    )
}

/// The zone snapshot has no moisture reading for the plant's pin.
pub fn no_data(zone: Zone, plant: &Plant, pin: Pin, timestamp: Timestamp) -> Notification {
    Notification {
        id: new_id(),
        notification_type: NotificationType::Moisture,
        kind: NotificationKind::NoData,
        severity: Severity::Warning,
        title: "No Moisture Data".to_string(),
        message: format!(
            "{} in {}: no moisture data received from Pin {pin}",
            plant.name,
            zone.display_name()
        ),
        sensor: Some(Sensor::Moisture),
        value: 0.0,
        threshold: NO_DATA_RANGE,
        zone_id: zone,
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        pin: Some(pin),
        timestamp,
        is_read: false,
    }
}

/// The zone has no sensor snapshot at all.
pub fn no_sensor_data(zone: Zone, plant: &Plant, timestamp: Timestamp) -> Notification {
    Notification {
        id: new_id(),
        notification_type: NotificationType::Environmental,
        kind: NotificationKind::NoSensorData,
        severity: Severity::Warning,
        title: "No Sensor Data".to_string(),
        message: format!(
            "{} in {}: no environmental data available for this zone",
            plant.name,
            zone.display_name()
        ),
        sensor: None,
        value: 0.0,
        threshold: NO_DATA_RANGE,
        zone_id: zone,
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        pin: None,
        timestamp,
        is_read: false,
    }
}

#[allow(clippy::too_many_arguments)]
fn violation(
    notification_type: NotificationType,
    sensor: Sensor,
    value: f64,
    range: ThresholdRange,
    zone: Zone,
    plant: &Plant,
    pin: Option<Pin>,
    timestamp: Timestamp,
) -> Notification {
    let is_below = range.is_below(value);
    let (direction, limit) = if is_below {
        ("below", range.min)
    } else {
        ("above", range.max)
    };
    let severity = severity::classify(sensor, value, is_below);
    let unit = sensor.unit();

    let mut message = format!(
        "{} in {}: {} is {direction} threshold ({}{unit} vs {}{unit})",
        plant.name,
        zone.display_name(),
        sensor.display_name(),
        format_value(value),
        format_value(limit),
    );
    if let Some(pin) = pin {
        message.push_str(&format!(" (Pin {pin})"));
    }

    Notification {
        id: new_id(),
        notification_type,
        kind: NotificationKind::Violation,
        severity,
        title: format!("{} {}", sensor.display_name(), severity.label()),
        message,
        sensor: Some(sensor),
        value,
        threshold: range,
        zone_id: zone,
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        pin,
        timestamp,
        is_read: false,
    }
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// One decimal place, without a trailing `.0`. Never prints `-0`.
fn format_value(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
