//! REST client for the garden backend.
//!
//! Wraps the three read endpoints the engine needs using [`reqwest`]:
//!
//! | Trait                     | Request                                |
//! |---------------------------|----------------------------------------|
//! | [`ZoneCatalog`]           | `GET {base}/zones/{zone}/plants`       |
//! | [`SensorSnapshotSource`]  | `GET {base}/zones/{zone}/sensors/latest` |
//! | [`SystemThresholdSource`] | `GET {base}/thresholds`                |

use std::time::Duration;

use async_trait::async_trait;
use plantwatch_core::plant::Plant;
use plantwatch_core::snapshot::SensorSnapshot;
use plantwatch_core::thresholds::SystemThresholds;
use plantwatch_core::zone::Zone;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::sources::{SensorSnapshotSource, SystemThresholdSource, ZoneCatalog};

/// HTTP client for a single garden backend.
pub struct HttpGardenClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGardenClient {
    /// Create a client with its own connection pool.
    ///
    /// * `base_url` - API root, e.g. `http://garden.local:8080/api`.
    /// * `request_timeout` - transport-level timeout for each request.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    async fn get(&self, path: &str) -> Result<reqwest::Response, FetchError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "Fetching from garden API");
        Ok(self.client.get(url).send().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = Self::ensure_success(self.get(path).await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Turn a non-2xx response into [`FetchError::Status`] with the body
    /// text attached for debugging.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ZoneCatalog for HttpGardenClient {
    async fn plants(&self, zone: Zone) -> Result<Vec<Plant>, FetchError> {
        self.get_json(&format!("/zones/{zone}/plants")).await
    }
}

#[async_trait]
impl SensorSnapshotSource for HttpGardenClient {
    /// A `404` or a JSON `null` body both mean the zone has no snapshot yet.
    async fn latest(&self, zone: Zone) -> Result<Option<SensorSnapshot>, FetchError> {
        let response = self.get(&format!("/zones/{zone}/sensors/latest")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Option<SensorSnapshot>>().await?)
    }
}

#[async_trait]
impl SystemThresholdSource for HttpGardenClient {
    async fn system_thresholds(&self) -> Result<SystemThresholds, FetchError> {
        self.get_json("/thresholds").await
    }
}
