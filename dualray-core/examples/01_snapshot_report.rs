//! Snapshot Report Example
//!
//! Loads the bundled fleet snapshot, runs a few synthesis ticks and prints
//! what each dashboard view would show.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p dualray-core --example 01_snapshot_report
//! ```

use chrono::{Duration, TimeZone, Utc};
use dualray_core::queries::TimeRange;
use dualray_core::time::FixedClock;
use dualray_core::{DashboardSettings, TelemetryHub};

const SNAPSHOT: &str = include_str!("../../data/dual_ray_swarm_synthetic.csv");

fn main() {
    println!("DualRay Snapshot Report");
    println!("=======================\n");

    // Pin the clock just after the snapshot so no boat reads as stale
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 15).unwrap());
    let mut hub = TelemetryHub::seeded(2024).with_clock(clock.clone());

    let stats = hub.load_snapshot(SNAPSHOT);
    println!(
        "Loaded {} rows ({} skipped, {} lossy) for {} boats\n",
        stats.rows_read,
        stats.skipped_rows,
        stats.lossy_rows,
        hub.boats().len()
    );

    for _ in 0..5 {
        clock.advance(Duration::seconds(3));
        hub.tick();
    }

    let labels = hub.labels();
    println!("{:<5} {:>8} {:>16} {:>18} {:>15}", "Boat", "Status", labels.laser, labels.infrared, labels.fused);
    for boat in hub.boats() {
        let acc = hub.sensor_accuracy(&boat);
        println!(
            "{:<5} {:>8} {:>15.1}% {:>17.1}% {:>14.1}%",
            boat,
            hub.boat_status(&boat),
            acc.laser,
            acc.infrared,
            acc.fused
        );
    }
    println!();

    if let Some(report) = hub.validate_accuracy("B1") {
        println!("B1 validation:");
        println!("  laser    {:.1} ± {:.2} ({:?}, {:?})", report.laser.average_accuracy, report.laser.standard_deviation, report.laser.stability, report.laser.status);
        println!("  infrared {:.1} ± {:.2} ({:?}, {:?})", report.infrared.average_accuracy, report.infrared.standard_deviation, report.infrared.stability, report.infrared.status);
        println!("  fusion   +{:.1} over best channel, reliability {:.2}", report.fusion.improvement_over_individual, report.fusion.reliability_score);
        println!("  → {}\n", report.fusion.recommendation);
    }

    let fleet = hub.fleet_snapshot();
    println!("Fleet: {} ml collected, avg battery {:.0}%, max {:.2} ppm, {} active sensors", fleet.total_volume_ml, fleet.average_battery, fleet.max_concentration_ppm, fleet.active_sensors);

    if let Some(stats) = hub.concentration_statistics() {
        println!("Concentration: mean {:.2}, median {:.2}, range {:.2}-{:.2}, sd {:.2}", stats.mean, stats.median, stats.min, stats.max, stats.std_dev);
    }
    for bucket in hub.hourly_profile(TimeRange::LastDay) {
        println!("  {:02}:00  {} readings, {:.2} ppm", bucket.hour, bucket.readings, bucket.average_concentration_ppm);
    }
    println!();

    let alerts = hub.alerts(&DashboardSettings::default());
    println!("{} alerts:", alerts.len());
    for alert in &alerts {
        println!("  [{:?}] {}: {}", alert.severity, alert.boat_id, alert.message);
    }

    let health = hub.health();
    println!("\nData integrity {:.0}% ({:?})", health.data_integrity, health.grade);
    println!("Export would be saved as {}", hub.export_file_name());
}
