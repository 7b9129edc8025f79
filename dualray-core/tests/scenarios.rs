//! End-to-end scenarios against a hub on a fixed clock

mod common;

use chrono::Duration;
use dualray_core::queries::{PerformanceTier, Stability, TimeRange, Trend};
use dualray_core::{AccuracySummary, BoatStatus};

use common::{hub, scored, snapshot, start};

#[test]
fn cold_start_is_empty_but_answers() {
    let (hub, _) = hub(1);

    assert!(hub.latest_reading("B1").is_none());
    assert_eq!(hub.boat_status("B1"), BoatStatus::Offline);
    assert_eq!(hub.sensor_accuracy("B1"), AccuracySummary::default());
    assert!(hub.validate_accuracy("B1").is_none());
    assert!(hub.technical_detail("B1").is_none());
    assert_eq!(hub.fleet_snapshot().boats, 0);
    assert!(hub.map_positions().is_empty());
    assert!(hub.concentration_statistics().is_none());
    assert!(hub.last_update().is_none());
}

#[test]
fn single_tick_adds_one_reading() {
    let (mut hub, clock) = hub(2);
    hub.insert(scored("B1", start(), 50, 90.0, 85.0, 92.0));

    clock.advance(Duration::seconds(3));
    hub.tick();

    let history = hub.history("B1");
    assert_eq!(history.len(), 2);
    let m = &history[1].metrics;
    assert!(m.fused_accuracy >= m.laser_accuracy.max(m.infrared_accuracy));
    assert_eq!(history[1].timestamp(), start() + Duration::seconds(3));
}

#[test]
fn stale_boat_is_offline() {
    let (mut hub, clock) = hub(3);
    hub.insert(scored("B1", start(), 90, 95.0, 90.0, 96.0));
    clock.advance(Duration::minutes(10));
    assert_eq!(hub.boat_status("B1"), BoatStatus::Offline);
}

#[test]
fn low_battery_with_perfect_scores_warns() {
    let (mut hub, _) = hub(4);
    hub.insert(scored("B1", start(), 15, 100.0, 100.0, 100.0));
    assert_eq!(hub.boat_status("B1"), BoatStatus::Warning);
}

#[test]
fn healthy_boat_is_active() {
    let (mut hub, _) = hub(5);
    hub.insert(scored("B1", start(), 80, 92.0, 86.0, 94.0));
    assert_eq!(hub.boat_status("B1"), BoatStatus::Active);
}

#[test]
fn validation_needs_five_readings() {
    let (mut hub, _) = hub(6);
    for i in 0..4 {
        hub.insert(scored("B1", start() + Duration::seconds(i), 80, 90.0, 85.0, 92.0));
    }
    assert!(hub.validate_accuracy("B1").is_none());

    hub.insert(scored("B1", start() + Duration::seconds(4), 80, 90.0, 85.0, 92.0));
    let report = hub.validate_accuracy("B1").expect("five readings");
    assert_eq!(report.laser.average_accuracy, 90.0);
    assert_eq!(report.laser.standard_deviation, 0.0);
    assert_eq!(report.laser.stability, Stability::Stable);
    assert_eq!(report.laser.status, PerformanceTier::Optimal);
    assert_eq!(report.infrared.status, PerformanceTier::Optimal);
    assert_eq!(report.fusion.improvement_over_individual, 2.0);
    assert!((report.fusion.reliability_score - 0.92).abs() < 1e-9);
    assert_eq!(report.fusion.recommendation, "System performing optimally");
}

#[test]
fn validation_uses_only_last_ten() {
    let (mut hub, _) = hub(7);
    for i in 0..5 {
        hub.insert(scored("B1", start() + Duration::seconds(i), 80, 40.0, 40.0, 40.0));
    }
    for i in 5..15 {
        hub.insert(scored("B1", start() + Duration::seconds(i), 80, 80.0, 75.0, 85.0));
    }
    let report = hub.validate_accuracy("B1").unwrap();
    assert_eq!(report.laser.average_accuracy, 80.0);
    assert_eq!(report.laser.status, PerformanceTier::Acceptable);
    assert_eq!(report.fusion.recommendation, "Consider recalibration");
}

#[test]
fn unstable_channel_lowers_reliability() {
    let (mut hub, _) = hub(8);
    for (i, laser) in [80.0, 95.0, 80.0, 95.0, 80.0, 95.0].iter().enumerate() {
        hub.insert(scored("B1", start() + Duration::seconds(i as i64), 80, *laser, 85.0, 95.0));
    }
    let report = hub.validate_accuracy("B1").unwrap();
    assert_eq!(report.laser.stability, Stability::Unstable);
    // sd 7.5 → 0.95 × 0.25
    assert!((report.fusion.reliability_score - 0.2375).abs() < 1e-9);
}

#[test]
fn nan_rows_do_not_poison_other_boats() {
    let (mut hub, _) = hub(9);
    let text = format!(
        "{}\n2024-09-15T10:00:00Z,B1,19.0,72.8,oops,bad,40,250,76,solar",
        snapshot(2, 1)
    );
    let stats = hub.load_snapshot(&text);
    assert_eq!(stats.lossy_rows, 1);

    let fleet = hub.fleet_snapshot();
    assert!(fleet.average_concentration_ppm.is_finite());
    assert!(fleet.average_particle_size_microns.is_finite());
    assert!(fleet.average_fused_accuracy.is_finite());

    let b1 = hub.latest_reading("B1").unwrap();
    assert!(b1.sample.concentration_ppm.is_nan());
    assert!((0.0..=100.0).contains(&b1.metrics.infrared_accuracy));
}

#[test]
fn fleet_snapshot_over_latest_readings() {
    let (mut hub, _) = hub(10);
    hub.load_snapshot(&snapshot(3, 2));
    let fleet = hub.fleet_snapshot();

    assert_eq!(fleet.boats, 3);
    assert_eq!(fleet.total_volume_ml, 200 + 210 + 220);
    assert_eq!(fleet.average_battery, (90.0 + 75.0 + 60.0) / 3.0);
    assert!((fleet.max_concentration_ppm - 2.1).abs() < 1e-9);
    assert_eq!(fleet.active_sensors, 6);
}

#[test]
fn trend_needs_six_readings() {
    let (mut hub, _) = hub(11);
    for i in 0..5 {
        let mut r = scored("B1", start() + Duration::seconds(i), 80, 90.0, 85.0, 92.0);
        r.sample.concentration_ppm = 1.0;
        hub.insert(r);
    }
    assert!(hub.concentration_trend("B1").is_none());

    let mut r = scored("B1", start() + Duration::seconds(5), 80, 90.0, 85.0, 92.0);
    r.sample.concentration_ppm = 2.0;
    hub.insert(r);
    // recent (1 + 1 + 2) / 3 vs earlier 1.0
    assert_eq!(hub.concentration_trend("B1"), Some(Trend::Up));
}

#[test]
fn analytics_window_is_strict() {
    let (mut hub, clock) = hub(12);
    hub.insert(scored("B1", start(), 80, 90.0, 85.0, 92.0));
    hub.insert(scored("B1", start() + Duration::minutes(30), 80, 90.0, 85.0, 92.0));

    clock.set(start() + Duration::hours(1));
    assert_eq!(hub.readings_within(TimeRange::LastHour).len(), 1);
    assert_eq!(hub.readings_within(TimeRange::LastDay).len(), 2);

    let profile = hub.hourly_profile(TimeRange::LastDay);
    assert_eq!(profile.len(), 1);
    assert_eq!(profile[0].hour, 10);
    assert_eq!(profile[0].readings, 2);
    assert_eq!(profile[0].total_volume_ml, 500);
}

#[test]
fn health_counts_last_five_minutes() {
    let (mut hub, clock) = hub(13);
    hub.load_snapshot(&snapshot(5, 5));
    clock.advance(Duration::seconds(15));
    let health = hub.health();
    assert_eq!(health.recent_readings, 25);
    assert_eq!(health.data_integrity, 100.0);
    assert_eq!(health.last_update, Some(start()));
}

#[test]
fn map_marks_every_boat() {
    let (mut hub, _) = hub(14);
    hub.load_snapshot(&snapshot(4, 1));
    let positions = hub.map_positions();
    let ids: Vec<&str> = positions.iter().map(|p| p.boat_id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B2", "B3", "B4"]);
    assert!(positions.iter().all(|p| (0.0..=1.0).contains(&p.opacity)));
    assert_ne!(positions[0].status, BoatStatus::Offline);
}

#[test]
fn export_round_trips_through_load() {
    let (mut hub, clock) = hub(15);
    hub.load_snapshot(&snapshot(3, 4));
    clock.advance(Duration::seconds(3));
    hub.tick();

    let exported = hub.export_csv();
    let (mut other, _) = common::hub(99);
    let stats = other.load_snapshot(&exported);

    assert_eq!(stats.rows_read, hub.readings().len());
    for (a, b) in hub.readings().iter().zip(other.readings()) {
        assert_eq!(a.sample.boat_id, b.sample.boat_id);
        assert_eq!(a.sample.timestamp, b.sample.timestamp);
        assert_eq!(a.sample.battery_status, b.sample.battery_status);
        assert!((a.sample.concentration_ppm - b.sample.concentration_ppm).abs() < 1e-9);
        assert!((a.sample.particle_size_microns - b.sample.particle_size_microns).abs() < 1e-9);
    }
}
