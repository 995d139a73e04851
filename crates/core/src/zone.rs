//! The four fixed growing zones.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A growing area with its own shared sensor snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "zone1")]
    Zone1,
    #[serde(rename = "zone2")]
    Zone2,
    #[serde(rename = "zone3")]
    Zone3,
    #[serde(rename = "zone4")]
    Zone4,
}

impl Zone {
    /// Every known zone, in evaluation order.
    pub const ALL: [Zone; 4] = [Zone::Zone1, Zone::Zone2, Zone::Zone3, Zone::Zone4];

    pub fn id(self) -> &'static str {
        match self {
            Zone::Zone1 => "zone1",
            Zone::Zone2 => "zone2",
            Zone::Zone3 => "zone3",
            Zone::Zone4 => "zone4",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Zone::Zone1 => "Zone 1",
            Zone::Zone2 => "Zone 2",
            Zone::Zone3 => "Zone 3",
            Zone::Zone4 => "Zone 4",
        }
    }

    /// Look up a zone by its wire identifier (`"zone1"` .. `"zone4"`).
    pub fn from_id(id: &str) -> Option<Zone> {
        Zone::ALL.into_iter().find(|z| z.id() == id)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
