//! Notification records produced by the monitoring engine.
//!
//! A [`Notification`] is either a threshold violation or one of the two
//! "no data" variants. Constructors live in [`builder`]; identity for
//! de-duplication is the semantic [`DedupKey`](crate::dedup::DedupKey), never
//! the generated `id`.

pub mod builder;

use serde::{Deserialize, Serialize};

use crate::dedup::DedupKey;
use crate::sensor::Sensor;
use crate::severity::Severity;
use crate::thresholds::ThresholdRange;
use crate::types::{Pin, PlantId, Timestamp};
use crate::zone::Zone;

/// Which feed a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Zone-wide channels (temperature, humidity, light, air quality).
    Environmental,
    /// Per-pin soil moisture.
    Moisture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    /// A reading outside its resolved range.
    Violation,
    /// The zone snapshot exists but has no reading for the plant's pin.
    NoData,
    /// The zone has no snapshot at all.
    NoSensorData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Opaque, generation-time unique. Not stable across runs.
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub kind: NotificationKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// `None` only for [`NotificationKind::NoSensorData`].
    pub sensor: Option<Sensor>,
    pub value: f64,
    pub threshold: ThresholdRange,
    pub zone_id: Zone,
    pub plant_id: PlantId,
    pub plant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<Pin>,
    pub timestamp: Timestamp,
    pub is_read: bool,
}

impl Notification {
    /// Semantic identity used by [`dedupe`](crate::dedup::dedupe).
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            notification_type: self.notification_type,
            zone: self.zone_id,
            plant_id: self.plant_id.clone(),
            sensor: self.sensor,
            pin: self.pin,
        }
    }

    pub fn is_violation(&self) -> bool {
        self.kind == NotificationKind::Violation
    }
}

/// Order notifications newest first. Stable, so ties keep their input order.
pub fn sort_newest_first(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
