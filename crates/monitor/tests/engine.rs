//! Integration tests for a full evaluation run over an in-memory garden.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use chrono::{DateTime, TimeZone, Utc};
use plantwatch_core::notification::{Notification, NotificationKind, NotificationType};
use plantwatch_core::plant::{Plant, PlantThresholds};
use plantwatch_core::sensor::Sensor;
use plantwatch_core::severity::Severity;
use plantwatch_core::snapshot::{EnvironmentalReadings, SensorSnapshot, SoilMoistureReading};
use plantwatch_core::stats::NotificationStats;
use plantwatch_core::thresholds::{SystemThresholds, ThresholdRange, HUMIDITY_RANGE};
use plantwatch_core::zone::Zone;
use plantwatch_monitor::memory::StaticGarden;
use plantwatch_monitor::{MonitorError, NotificationEngine};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, hour, 0, 0).unwrap()
}

fn thresholds() -> PlantThresholds {
    PlantThresholds {
        moisture: Some(ThresholdRange::new(30.0, 70.0)),
        temperature: Some(ThresholdRange::new(18.0, 28.0)),
        light: Some(ThresholdRange::new(50.0, 150.0)),
        air_quality: Some(ThresholdRange::new(0.0, 100.0)),
    }
}

fn plant(id: &str, zone: Zone, pin: u8) -> Plant {
    Plant {
        id: id.to_string(),
        name: format!("Plant {id}"),
        zone,
        moisture_pin: pin,
        thresholds: thresholds(),
    }
}

/// Every environmental reading comfortably inside [`thresholds`].
fn calm() -> EnvironmentalReadings {
    EnvironmentalReadings {
        humidity: Some(60.0),
        temperature: Some(22.0),
        light: Some(100.0),
        air_quality: Some(40.0),
    }
}

fn snapshot(
    zone: Zone,
    hour: u32,
    environment: EnvironmentalReadings,
    soil: &[(u8, f64)],
) -> SensorSnapshot {
    SensorSnapshot {
        zone_id: zone,
        timestamp: at(hour),
        environment,
        soil_moisture: soil
            .iter()
            .map(|&(pin, moisture)| SoilMoistureReading { pin, moisture })
            .collect(),
    }
}

fn engine(garden: StaticGarden) -> NotificationEngine {
    NotificationEngine::from_source(Arc::new(garden))
}

/// Notifications with ids blanked, for comparisons across runs.
fn without_ids(list: &[Notification]) -> Vec<Notification> {
    list.iter()
        .cloned()
        .map(|mut n| {
            n.id.clear();
            n
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn low_moisture_produces_single_warning() {
    let garden = StaticGarden::new()
        .with_plant(plant("P1", Zone::Zone1, 34))
        .with_snapshot(snapshot(Zone::Zone1, 9, calm(), &[(34, 25.0)]));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 1);
    let n = &report.notifications[0];
    assert_eq!(n.notification_type, NotificationType::Moisture);
    assert_eq!(n.severity, Severity::Warning);
    assert_eq!(n.pin, Some(34));
    assert!(n.message.contains("25% vs 30%"), "{}", n.message);
}

#[tokio::test]
async fn high_air_quality_is_critical() {
    let mut p2 = plant("P2", Zone::Zone1, 35);
    p2.thresholds.air_quality = Some(ThresholdRange::new(0.0, 100.0));
    let garden = StaticGarden::new().with_plant(p2).with_snapshot(snapshot(
        Zone::Zone1,
        9,
        EnvironmentalReadings {
            air_quality: Some(550.0),
            ..calm()
        },
        &[(35, 50.0)],
    ));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 1);
    let n = &report.notifications[0];
    assert_eq!(n.notification_type, NotificationType::Environmental);
    assert_eq!(n.sensor, Some(Sensor::AirQuality));
    assert_eq!(n.severity, Severity::Critical);
    assert!(n.message.contains("above threshold"), "{}", n.message);
}

#[tokio::test]
async fn absent_snapshot_yields_one_no_sensor_data_per_plant() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone2, 32))
        .with_plant(plant("b", Zone::Zone2, 33))
        .with_plant(plant("c", Zone::Zone2, 34));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 3);
    for n in &report.notifications {
        assert_eq!(n.kind, NotificationKind::NoSensorData);
        assert_eq!(n.zone_id, Zone::Zone2);
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.value, 0.0);
        assert_eq!(n.timestamp, at(10));
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn zone_without_plants_is_silent_even_with_alarming_snapshot() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_snapshot(snapshot(Zone::Zone1, 9, calm(), &[(34, 50.0)]))
        .with_snapshot(snapshot(
            Zone::Zone3,
            9,
            EnvironmentalReadings {
                temperature: Some(45.0),
                air_quality: Some(900.0),
                ..calm()
            },
            &[],
        ));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert!(report.notifications.iter().all(|n| n.zone_id != Zone::Zone3));
    assert!(report.notifications.is_empty());
}

#[tokio::test]
async fn values_inside_ranges_produce_nothing() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_snapshot(snapshot(
            Zone::Zone1,
            9,
            EnvironmentalReadings {
                // Exactly on the bounds.
                humidity: Some(HUMIDITY_RANGE.max),
                temperature: Some(18.0),
                light: Some(150.0),
                air_quality: Some(0.0),
            },
            &[(34, 30.0)],
        ));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert!(report.notifications.is_empty());
    assert_eq!(report.stats, NotificationStats::default());
}

#[tokio::test]
async fn every_violation_lies_outside_its_threshold() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_plant(plant("b", Zone::Zone1, 35))
        .with_snapshot(snapshot(
            Zone::Zone1,
            9,
            EnvironmentalReadings {
                humidity: Some(95.0),
                temperature: Some(12.0),
                light: Some(5.0),
                air_quality: Some(120.0),
            },
            &[(34, 5.0), (35, 95.0)],
        ));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    // Four environmental channels plus moisture, for both plants.
    assert_eq!(report.notifications.len(), 10);
    for n in &report.notifications {
        assert!(n.is_violation());
        assert!(!n.threshold.contains(n.value), "{n:?}");
    }
}

#[tokio::test]
async fn humidity_uses_fixed_range() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_snapshot(snapshot(
            Zone::Zone1,
            9,
            EnvironmentalReadings {
                humidity: Some(85.0),
                ..calm()
            },
            &[(34, 50.0)],
        ));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 1);
    let n = &report.notifications[0];
    assert_eq!(n.sensor, Some(Sensor::Humidity));
    assert_eq!(n.threshold, HUMIDITY_RANGE);
    assert_eq!(n.severity, Severity::Warning);
}

#[tokio::test]
async fn missing_pin_reading_yields_no_data() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 36))
        .with_snapshot(snapshot(Zone::Zone1, 9, calm(), &[(34, 50.0)]));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 1);
    let n = &report.notifications[0];
    assert_eq!(n.kind, NotificationKind::NoData);
    assert_eq!(n.pin, Some(36));
    assert_eq!(n.timestamp, at(9));
}

#[tokio::test]
async fn missing_plant_threshold_skips_only_that_sensor() {
    let mut p = plant("a", Zone::Zone1, 34);
    p.thresholds.light = None;
    let garden = StaticGarden::new().with_plant(p).with_snapshot(snapshot(
        Zone::Zone1,
        9,
        EnvironmentalReadings {
            light: Some(1.0),
            temperature: Some(40.0),
            ..calm()
        },
        &[(34, 50.0)],
    ));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    let sensors: Vec<_> = report.notifications.iter().map(|n| n.sensor).collect();
    assert_eq!(sensors, [Some(Sensor::Temperature)]);
}

#[tokio::test]
async fn non_finite_readings_are_ignored() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_snapshot(snapshot(
            Zone::Zone1,
            9,
            EnvironmentalReadings {
                temperature: Some(f64::NAN),
                ..calm()
            },
            &[(34, f64::INFINITY)],
        ));

    let report = engine(garden).run_at(at(10)).await.unwrap();
    assert!(report.notifications.is_empty());
}

#[tokio::test]
async fn rerun_over_same_data_is_identical_apart_from_ids() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_plant(plant("b", Zone::Zone2, 34))
        .with_plant(plant("c", Zone::Zone4, 39))
        .with_snapshot(snapshot(
            Zone::Zone1,
            8,
            EnvironmentalReadings {
                light: Some(3.0),
                ..calm()
            },
            &[(34, 95.0)],
        ))
        .with_snapshot(snapshot(Zone::Zone4, 7, calm(), &[]));
    let engine = engine(garden);

    let first = engine.run_at(at(10)).await.unwrap();
    let second = engine.run_at(at(10)).await.unwrap();

    assert!(!first.notifications.is_empty());
    assert_eq!(without_ids(&first.notifications), without_ids(&second.notifications));
    assert_eq!(first.stats, second.stats);
}

#[tokio::test]
async fn output_is_sorted_newest_first() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_plant(plant("b", Zone::Zone2, 34))
        .with_plant(plant("c", Zone::Zone3, 34))
        .with_plant(plant("d", Zone::Zone4, 34))
        .with_snapshot(snapshot(Zone::Zone1, 6, calm(), &[(34, 5.0)]))
        .with_snapshot(snapshot(Zone::Zone3, 8, calm(), &[(34, 95.0)]))
        .with_snapshot(snapshot(Zone::Zone4, 7, calm(), &[]));

    let report = engine(garden).run_at(at(12)).await.unwrap();

    assert_eq!(report.notifications.len(), 4);
    for pair in report.notifications.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
    let zones: Vec<Zone> = report.notifications.iter().map(|n| n.zone_id).collect();
    assert_eq!(zones, [Zone::Zone2, Zone::Zone3, Zone::Zone4, Zone::Zone1]);
}

#[tokio::test]
async fn stats_fold_the_final_list() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_snapshot(snapshot(
            Zone::Zone1,
            9,
            EnvironmentalReadings {
                light: Some(2.0),
                air_quality: Some(700.0),
                temperature: Some(30.0),
                ..calm()
            },
            &[(34, 20.0)],
        ))
        .with_plant(plant("b", Zone::Zone2, 34));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(
        report.stats,
        NotificationStats {
            total: 5,
            critical: 2,
            warning: 3,
            unread: 5,
        }
    );
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn threshold_failure_substitutes_defaults() {
    let garden = StaticGarden::new()
        .with_system_thresholds(SystemThresholds {
            light: ThresholdRange::new(1.0, 2.0),
            ..SystemThresholds::default()
        })
        .fail_thresholds()
        .with_plant(plant("a", Zone::Zone1, 34));

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert!(report.thresholds_defaulted);
    assert_eq!(report.system_thresholds, SystemThresholds::default());
    assert_eq!(report.notifications.len(), 1);
}

#[tokio::test]
async fn catalog_failure_skips_only_that_zone() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_plant(plant("b", Zone::Zone2, 34))
        .fail_plants(Zone::Zone1);

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 1);
    assert_eq!(report.notifications[0].zone_id, Zone::Zone2);
}

#[tokio::test]
async fn snapshot_failure_degrades_to_no_sensor_data() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_plant(plant("b", Zone::Zone1, 35))
        .with_snapshot(snapshot(Zone::Zone1, 9, calm(), &[(34, 5.0), (35, 5.0)]))
        .fail_snapshot(Zone::Zone1);

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert_eq!(report.notifications.len(), 2);
    assert!(report
        .notifications
        .iter()
        .all(|n| n.kind == NotificationKind::NoSensorData));
}

#[tokio::test(start_paused = true)]
async fn timed_out_snapshot_is_treated_as_absent() {
    let garden = StaticGarden::new()
        .with_plant(plant("a", Zone::Zone1, 34))
        .with_plant(plant("b", Zone::Zone4, 34))
        .with_snapshot(snapshot(Zone::Zone1, 9, calm(), &[(34, 50.0)]))
        .with_snapshot(snapshot(Zone::Zone4, 9, calm(), &[(34, 50.0)]))
        .with_snapshot_delay(Zone::Zone4, Duration::from_secs(120));

    let report = engine(garden)
        .with_fetch_timeout(Duration::from_secs(30))
        .run_at(at(10))
        .await
        .unwrap();

    assert_eq!(report.notifications.len(), 1);
    let n = &report.notifications[0];
    assert_eq!(n.zone_id, Zone::Zone4);
    assert_eq!(n.kind, NotificationKind::NoSensorData);
}

#[tokio::test(start_paused = true)]
async fn slow_zone_within_timeout_does_not_change_result() {
    let build = || {
        StaticGarden::new()
            .with_plant(plant("a", Zone::Zone1, 34))
            .with_plant(plant("b", Zone::Zone2, 34))
            .with_snapshot(snapshot(Zone::Zone1, 9, calm(), &[(34, 5.0)]))
            .with_snapshot(snapshot(Zone::Zone2, 9, calm(), &[(34, 95.0)]))
    };

    let fast = engine(build()).run_at(at(10)).await.unwrap();
    let slow = engine(build().with_snapshot_delay(Zone::Zone1, Duration::from_secs(5)))
        .run_at(at(10))
        .await
        .unwrap();

    assert_eq!(without_ids(&fast.notifications), without_ids(&slow.notifications));
}

#[tokio::test]
async fn every_fetch_failing_is_surfaced() {
    let garden = Zone::ALL
        .into_iter()
        .fold(StaticGarden::new().fail_thresholds(), StaticGarden::fail_plants);

    let err = engine(garden).run_at(at(10)).await.unwrap_err();

    assert_matches!(err, MonitorError::SourcesUnavailable(_));
}

#[tokio::test]
async fn all_catalogs_failing_with_thresholds_up_is_not_systemic() {
    let garden = Zone::ALL
        .into_iter()
        .fold(StaticGarden::new(), StaticGarden::fail_plants);

    let report = engine(garden).run_at(at(10)).await.unwrap();

    assert!(report.notifications.is_empty());
    assert!(!report.thresholds_defaulted);
}
