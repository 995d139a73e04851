/// Plant identifiers are opaque strings assigned by the garden backend.
pub type PlantId = String;

/// GPIO pin number a soil moisture probe is wired to.
pub type Pin = u8;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
