//! Shared fixtures for dualray-core integration tests
//!
//! - a fixed start instant and hubs pinned to a controllable clock
//! - snapshot documents for a small fleet
//! - hand-built readings with exact scores for status and validation cases

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use dualray_core::csv::SNAPSHOT_HEADER;
use dualray_core::reading::{CalibrationStatus, ChannelStatus, DerivedMetrics, PowerSource, Sample};
use dualray_core::time::{FixedClock, Timestamp};
use dualray_core::{Reading, TelemetryHub};

/// Instant every fixture is anchored to
pub fn start() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 0).unwrap()
}

/// Seeded hub whose clock sits at `start()`
pub fn hub(seed: u64) -> (TelemetryHub, FixedClock) {
    let clock = FixedClock::new(start());
    (TelemetryHub::seeded(seed).with_clock(clock.clone()), clock)
}

/// Base fields for one boat at `at`
pub fn sample(boat: &str, battery: u8, concentration: f64, at: Timestamp) -> Sample {
    Sample {
        timestamp: at,
        boat_id: boat.to_string(),
        gps_lat: 19.076,
        gps_long: 72.8777,
        particle_size_microns: 12.5,
        concentration_ppm: concentration,
        depth_cm: 40,
        collection_volume_ml: 250,
        battery_status: battery,
        power_source: PowerSource::Solar,
    }
}

/// Reading with exact scores, statuses derived from them
pub fn scored(boat: &str, at: Timestamp, battery: u8, laser: f64, infrared: f64, fused: f64) -> Reading {
    Reading::new(
        sample(boat, battery, 1.0, at),
        DerivedMetrics {
            laser_accuracy: laser,
            infrared_accuracy: infrared,
            fused_accuracy: fused,
            laser_signal_strength: laser,
            infrared_signal_strength: infrared,
            laser_status: ChannelStatus::laser(laser),
            infrared_status: ChannelStatus::infrared(infrared),
            calibration_status: CalibrationStatus::from_fused(fused),
            sensor_temperature: 25.0,
            water_turbidity: 0.2,
            detection_confidence: fused,
        },
    )
}

/// Snapshot with `per_boat` rows for each of `boats` boats, 3 s apart
pub fn snapshot(boats: usize, per_boat: usize) -> String {
    let mut text = String::from(SNAPSHOT_HEADER);
    for step in 0..per_boat {
        let at = start() + Duration::seconds(3 * step as i64);
        for b in 0..boats {
            text.push_str(&format!(
                "\n{},B{},{:.4},{:.4},{:.1},{:.2},{},{},{},{}",
                at.to_rfc3339(),
                b + 1,
                19.07 + b as f64 * 0.01,
                72.87 + b as f64 * 0.01,
                10.0 + (step + b) as f64,
                0.5 + b as f64 * 0.8,
                30 + b * 5,
                200 + b * 10,
                90 - b * 15,
                if b % 2 == 0 { "solar" } else { "hydro" },
            ));
        }
    }
    text
}
