#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use plantwatch_core::plant::{Plant, PlantThresholds};
use plantwatch_core::snapshot::{EnvironmentalReadings, SensorSnapshot, SoilMoistureReading};
use plantwatch_core::thresholds::{SystemThresholds, ThresholdRange};
use plantwatch_core::zone::Zone;
use plantwatch_events::EventBus;
use plantwatch_monitor::memory::StaticGarden;
use plantwatch_monitor::sources::{SensorSnapshotSource, SystemThresholdSource, ZoneCatalog};
use plantwatch_monitor::{FeedCoordinator, FetchError, NotificationEngine};
use tower::ServiceExt;

use plantwatch_api::config::ServerConfig;
use plantwatch_api::router::build_app_router;
use plantwatch_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|var| match var {
        "HOST" => Some("127.0.0.1".to_string()),
        "PORT" => Some("0".to_string()),
        "REQUEST_TIMEOUT_SECS" => Some("30".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Garden whose every source can be switched off at runtime.
pub struct SwitchableGarden {
    inner: StaticGarden,
    down: AtomicBool,
}

impl SwitchableGarden {
    pub fn new(inner: StaticGarden) -> Self {
        Self {
            inner,
            down: AtomicBool::new(false),
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), FetchError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable("garden switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ZoneCatalog for SwitchableGarden {
    async fn plants(&self, zone: Zone) -> Result<Vec<Plant>, FetchError> {
        self.check()?;
        self.inner.plants(zone).await
    }
}

#[async_trait]
impl SensorSnapshotSource for SwitchableGarden {
    async fn latest(&self, zone: Zone) -> Result<Option<SensorSnapshot>, FetchError> {
        self.check()?;
        self.inner.latest(zone).await
    }
}

#[async_trait]
impl SystemThresholdSource for SwitchableGarden {
    async fn system_thresholds(&self) -> Result<SystemThresholds, FetchError> {
        self.check()?;
        self.inner.system_thresholds().await
    }
}

/// Two plants: a thirsty basil in zone 1 and a mint in zone 2, which has no
/// sensor station reporting.
pub fn sample_garden() -> StaticGarden {
    let thresholds = PlantThresholds {
        moisture: Some(ThresholdRange::new(30.0, 70.0)),
        temperature: Some(ThresholdRange::new(18.0, 28.0)),
        light: Some(ThresholdRange::new(50.0, 150.0)),
        air_quality: Some(ThresholdRange::new(0.0, 100.0)),
    };

    StaticGarden::new()
        .with_plant(Plant {
            id: "p1".to_string(),
            name: "Basil".to_string(),
            zone: Zone::Zone1,
            moisture_pin: 34,
            thresholds: thresholds.clone(),
        })
        .with_plant(Plant {
            id: "p2".to_string(),
            name: "Mint".to_string(),
            zone: Zone::Zone2,
            moisture_pin: 35,
            thresholds,
        })
        .with_snapshot(SensorSnapshot {
            zone_id: Zone::Zone1,
            timestamp: Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap(),
            environment: EnvironmentalReadings {
                humidity: Some(60.0),
                temperature: Some(22.0),
                light: Some(100.0),
                air_quality: Some(40.0),
            },
            soil_moisture: vec![SoilMoistureReading {
                pin: 34,
                moisture: 25.0,
            }],
        })
}

/// Coordinator over `garden`, with nothing published yet.
pub fn coordinator<S>(garden: Arc<S>) -> Arc<FeedCoordinator>
where
    S: ZoneCatalog + SensorSnapshotSource + SystemThresholdSource + 'static,
{
    let engine = NotificationEngine::from_source(garden);
    Arc::new(FeedCoordinator::new(engine, Arc::new(EventBus::default())))
}

/// Build the full application router around `coordinator`.
pub fn build_test_app(coordinator: Arc<FeedCoordinator>) -> Router {
    build_app_router(AppState {
        config: Arc::new(test_config()),
        coordinator,
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
