//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /          -> list_notifications
/// GET    /stats     -> get_stats
/// POST   /refresh   -> refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list_notifications))
        .route("/stats", get(notification::get_stats))
        .route("/refresh", post(notification::refresh))
}
