use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` while the latest refresh attempt failed.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a notification feed has been published yet.
    pub feed_ready: bool,
    pub refresh_interval_secs: u64,
}

/// GET /health -- returns service and feed health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let feed = state.coordinator.current().await;

    let status = if feed.last_error.is_none() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        feed_ready: feed.report.is_some(),
        refresh_interval_secs: state.config.monitor.refresh_interval.as_secs(),
    })
}

/// Mount health check routes (intended for root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
