use std::sync::Arc;

use plantwatch_monitor::FeedCoordinator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Owner of the published notification feed.
    pub coordinator: Arc<FeedCoordinator>,
}
