use axum::routing::get;
use axum::Router;

use crate::handlers::zone;
use crate::state::AppState;

/// Routes mounted at `/zones`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(zone::list_zones))
}
