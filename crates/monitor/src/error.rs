use std::time::Duration;

/// A single fetch from a garden data source failed.
///
/// Always recoverable: the engine degrades to defaults or "no data"
/// notifications for the affected resource only.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The garden backend returned a non-2xx status code.
    #[error("Garden API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The fetch did not complete within the configured timeout.
    #[error("{resource} fetch timed out after {}ms", after.as_millis())]
    Timeout { resource: String, after: Duration },

    /// The source reported itself unavailable without a transport error.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced to whoever drives an evaluation run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MonitorError {
    /// Every fetch in the run failed, so there is nothing meaningful to show.
    #[error("All garden data sources are unavailable: {0}")]
    SourcesUnavailable(String),
}
