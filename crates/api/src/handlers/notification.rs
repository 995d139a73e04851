//! Handlers for the `/notifications` resource.
//!
//! The feed is computed by the background scheduler; these handlers only read
//! what the [`FeedCoordinator`](plantwatch_monitor::FeedCoordinator) last
//! published, except for the manual refresh.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use plantwatch_core::notification::{Notification, NotificationType};
use plantwatch_core::severity::Severity;
use plantwatch_core::stats::NotificationStats;
use plantwatch_core::thresholds::SystemThresholds;
use plantwatch_core::types::Timestamp;
use plantwatch_core::zone::Zone;
use plantwatch_monitor::{EvaluationReport, RefreshOutcome, RefreshTrigger};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`. Every filter is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub zone: Option<Zone>,
    pub severity: Option<Severity>,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
}

impl NotificationQuery {
    fn matches(&self, n: &Notification) -> bool {
        self.zone.map_or(true, |z| n.zone_id == z)
            && self.severity.map_or(true, |s| n.severity == s)
            && self.notification_type.map_or(true, |t| n.notification_type == t)
    }
}

/// The published feed as served to clients.
///
/// `stats` always describe the `notifications` in this response, so a
/// filtered request gets filtered counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub notifications: Vec<Notification>,
    pub stats: NotificationStats,
    pub system_thresholds: SystemThresholds,
    pub thresholds_defaulted: bool,
    pub evaluated_at: Timestamp,
    /// Error from the latest refresh attempt when it failed after this feed
    /// was published.
    pub last_error: Option<String>,
}

impl FeedView {
    fn new(
        report: &EvaluationReport,
        query: &NotificationQuery,
        last_error: Option<String>,
    ) -> Self {
        let notifications: Vec<Notification> = report
            .notifications
            .iter()
            .filter(|n| query.matches(n))
            .cloned()
            .collect();
        let stats = NotificationStats::aggregate(&notifications);

        Self {
            notifications,
            stats,
            system_thresholds: report.system_thresholds,
            thresholds_defaulted: report.thresholds_defaulted,
            evaluated_at: report.evaluated_at,
            last_error,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
///
/// The latest published feed, newest first. 503 until the first refresh
/// succeeds.
pub async fn list_notifications(
    State(state): State<AppState>,
    query: Result<Query<NotificationQuery>, QueryRejection>,
) -> AppResult<Json<DataResponse<FeedView>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let feed = state.coordinator.current().await;
    let report = feed.report.ok_or(AppError::NotReady)?;

    Ok(Json(DataResponse {
        data: FeedView::new(&report, &query, feed.last_error),
    }))
}

/// GET /api/v1/notifications/stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<NotificationStats>>> {
    let feed = state.coordinator.current().await;
    let report = feed.report.ok_or(AppError::NotReady)?;

    Ok(Json(DataResponse { data: report.stats }))
}

/// POST /api/v1/notifications/refresh
///
/// Run the engine now and return the feed it produced. A failed run leaves
/// the previously published feed in place and answers 502; a run overtaken
/// by a newer one answers 409.
pub async fn refresh(State(state): State<AppState>) -> AppResult<Json<DataResponse<FeedView>>> {
    match state.coordinator.refresh(RefreshTrigger::Manual).await? {
        RefreshOutcome::Applied(report) => Ok(Json(DataResponse {
            data: FeedView::new(&report, &NotificationQuery::default(), None),
        })),
        RefreshOutcome::Superseded { generation, latest } => {
            Err(AppError::Superseded { generation, latest })
        }
    }
}
