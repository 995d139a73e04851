//! Plantwatch domain logic.
//!
//! Everything here is pure: no network, no clock reads except the UUIDv7
//! notification ids. The monitor crate fetches data and drives these pieces.

pub mod dedup;
pub mod error;
pub mod notification;
pub mod plant;
pub mod sensor;
pub mod severity;
pub mod snapshot;
pub mod stats;
pub mod thresholds;
pub mod types;
pub mod zone;
