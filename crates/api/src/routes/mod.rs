pub mod health;
pub mod notification;
pub mod zone;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /notifications                 feed (GET)
/// /notifications/stats           feed counts (GET)
/// /notifications/refresh         manual refresh (POST)
///
/// /zones                         known zones with per-zone counts (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/notifications", notification::router())
        .nest("/zones", zone::router())
}
