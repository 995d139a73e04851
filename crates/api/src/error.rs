use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use plantwatch_monitor::MonitorError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No refresh has succeeded yet, so there is no feed to serve.
    #[error("Notification feed is not available yet")]
    NotReady,

    /// A manual refresh failed; the previously published feed is retained.
    #[error("Failed to refresh notifications: {0}")]
    RefreshFailed(#[from] MonitorError),

    /// A newer refresh started while this one was running.
    #[error("Refresh {generation} was superseded by refresh {latest}")]
    Superseded { generation: u64, latest: u64 },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_READY",
                self.to_string(),
            ),
            AppError::RefreshFailed(err) => {
                tracing::error!(error = %err, "Manual refresh failed");
                (StatusCode::BAD_GATEWAY, "REFRESH_FAILED", self.to_string())
            }
            AppError::Superseded { .. } => (StatusCode::CONFLICT, "SUPERSEDED", self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
