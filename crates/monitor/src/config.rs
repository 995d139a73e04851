//! Monitoring configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use crate::engine::DEFAULT_FETCH_TIMEOUT;
use crate::scheduler::DEFAULT_REFRESH_INTERVAL;

const DEFAULT_GARDEN_API_URL: &str = "http://localhost:8080/api";

/// An environment variable was set to a value that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{var} must be {expected}, got {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Engine and scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Base URL of the garden backend API.
    pub garden_api_url: String,
    /// Upper bound for each individual fetch.
    pub fetch_timeout: Duration,
    /// Time between periodic refreshes.
    pub refresh_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            garden_api_url: DEFAULT_GARDEN_API_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `GARDEN_API_URL`        | `http://localhost:8080/api` |
    /// | `FETCH_TIMEOUT_SECS`    | `30`                        |
    /// | `REFRESH_INTERVAL_SECS` | `600`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let garden_api_url = lookup("GARDEN_API_URL").unwrap_or(defaults.garden_api_url);
        let fetch_timeout_secs = parse_or(
            &lookup,
            "FETCH_TIMEOUT_SECS",
            "a positive number of seconds",
            defaults.fetch_timeout.as_secs(),
        )?;
        let refresh_interval_secs = parse_or(
            &lookup,
            "REFRESH_INTERVAL_SECS",
            "a positive number of seconds",
            defaults.refresh_interval.as_secs(),
        )?;

        for (var, secs) in [
            ("FETCH_TIMEOUT_SECS", fetch_timeout_secs),
            ("REFRESH_INTERVAL_SECS", refresh_interval_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError {
                    var,
                    expected: "a positive number of seconds",
                    value: "0".to_string(),
                });
            }
        }

        Ok(Self {
            garden_api_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            refresh_interval: Duration::from_secs(refresh_interval_secs),
        })
    }
}

/// Parse `var` via `lookup`, returning `default` when it is unset.
pub fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => {
            let parsed: Result<T, _> = raw.trim().parse();
            parsed.map_err(|_| ConfigError {
                var,
                expected,
                value: raw,
            })
        }
    }
}
