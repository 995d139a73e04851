//! Collapse semantically identical notifications.
//!
//! Generated ids embed the clock, so two records describing the same problem
//! never share an id. Identity is the composite [`DedupKey`] instead.

use std::collections::HashSet;

use crate::notification::{Notification, NotificationType};
use crate::sensor::Sensor;
use crate::types::{Pin, PlantId};
use crate::zone::Zone;

/// Composite identity: `(type, zone, plant, sensor, pin)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub notification_type: NotificationType,
    pub zone: Zone,
    pub plant_id: PlantId,
    pub sensor: Option<Sensor>,
    pub pin: Option<Pin>,
}

/// Keep the first notification for each key, preserving input order.
pub fn dedupe(notifications: Vec<Notification>) -> Vec<Notification> {
    let mut seen = HashSet::with_capacity(notifications.len());
    notifications
        .into_iter()
        .filter(|n| seen.insert(n.dedup_key()))
        .collect()
}
