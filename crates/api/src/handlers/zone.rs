//! Handlers for the `/zones` resource.

use axum::extract::State;
use axum::Json;
use plantwatch_core::notification::Notification;
use plantwatch_core::stats::NotificationStats;
use plantwatch_core::zone::Zone;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// One zone with the counts from the published feed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub id: Zone,
    pub name: &'static str,
    /// `None` until a feed has been published.
    pub stats: Option<NotificationStats>,
}

/// GET /api/v1/zones
///
/// The four known zones in evaluation order. Available before the first
/// refresh; `stats` is then `null`.
pub async fn list_zones(State(state): State<AppState>) -> Json<DataResponse<Vec<ZoneSummary>>> {
    let feed = state.coordinator.current().await;

    let zones = Zone::ALL
        .into_iter()
        .map(|zone| ZoneSummary {
            id: zone,
            name: zone.display_name(),
            stats: feed.report.as_ref().map(|report| {
                let in_zone: Vec<Notification> = report
                    .notifications
                    .iter()
                    .filter(|n| n.zone_id == zone)
                    .cloned()
                    .collect();
                NotificationStats::aggregate(&in_zone)
            }),
        })
        .collect();

    Json(DataResponse { data: zones })
}
