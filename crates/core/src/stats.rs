//! Summary counts over a notification list.

use serde::{Deserialize, Serialize};

use crate::notification::Notification;
use crate::severity::Severity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub unread: usize,
}

impl NotificationStats {
    /// Fold `notifications` into counts.
    pub fn aggregate(notifications: &[Notification]) -> Self {
        notifications
            .iter()
            .fold(Self::default(), |mut stats, n| {
                stats.total += 1;
                match n.severity {
                    Severity::Critical => stats.critical += 1,
                    Severity::Warning => stats.warning += 1,
                }
                if !n.is_read {
                    stats.unread += 1;
                }
                stats
            })
    }
}
