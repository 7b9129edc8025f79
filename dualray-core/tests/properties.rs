//! Property tests for synthesis, eviction, validation and the CSV codec

mod common;

use chrono::Duration;
use dualray_core::csv::{export_csv, parse_snapshot};
use dualray_core::reading::{PowerSource, Sample};
use dualray_core::synth::{MetricSynthesizer, ScoringVariant};
use dualray_core::Reading;
use proptest::prelude::*;

use common::{hub, sample, scored, snapshot, start};

fn variant() -> impl Strategy<Value = ScoringVariant> {
    prop_oneof![
        Just(ScoringVariant::ClassicDualChannel),
        Just(ScoringVariant::UnifiedAiFusion),
    ]
}

fn power() -> impl Strategy<Value = PowerSource> {
    prop_oneof![
        Just(PowerSource::Solar),
        Just(PowerSource::Hydro),
        "[a-z]{1,8}".prop_map(|s| PowerSource::parse(&s)),
    ]
}

fn any_sample() -> impl Strategy<Value = Sample> {
    (
        0i64..86_400,
        1u8..=5,
        -90.0f64..90.0,
        -180.0f64..180.0,
        0.0f64..200.0,
        0.0f64..20.0,
        0u32..500,
        0u32..5_000,
        0u8..=100,
        power(),
    )
        .prop_map(|(secs, boat, lat, long, particle, ppm, depth, volume, battery, power)| Sample {
            timestamp: start() + Duration::seconds(secs),
            boat_id: format!("B{boat}"),
            gps_lat: lat,
            gps_long: long,
            particle_size_microns: particle,
            concentration_ppm: ppm,
            depth_cm: depth,
            collection_volume_ml: volume,
            battery_status: battery,
            power_source: power,
        })
}

fn assert_bounds(r: &Reading) {
    let m = &r.metrics;
    for v in [
        m.laser_accuracy,
        m.infrared_accuracy,
        m.fused_accuracy,
        m.laser_signal_strength,
        m.infrared_signal_strength,
        m.detection_confidence,
    ] {
        assert!((0.0..=100.0).contains(&v), "percentage out of range: {v}");
    }
    assert!((0.0..=0.5).contains(&m.water_turbidity));
    assert!((20.0..=35.0).contains(&m.sensor_temperature));
    assert!(m.fused_accuracy + 1e-9 >= m.laser_accuracy.max(m.infrared_accuracy));
}

proptest! {
    #[test]
    fn synthesized_readings_stay_in_bounds(
        seed in any::<u64>(),
        variant in variant(),
        s in any_sample(),
        ticks in 0usize..20,
    ) {
        let mut synth = MetricSynthesizer::seeded(variant, seed);
        let mut reading = synth.synthesize(s);
        assert_bounds(&reading);
        for i in 0..ticks {
            reading = synth.perturb(&reading, start() + Duration::seconds(i as i64));
            assert_bounds(&reading);
        }
    }

    #[test]
    fn corrupt_inputs_still_bounded(
        seed in any::<u64>(),
        ppm in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(-5.0), 0.0f64..1e6],
    ) {
        let mut synth = MetricSynthesizer::seeded(ScoringVariant::ClassicDualChannel, seed);
        let reading = synth.synthesize(sample("B1", 0, ppm, start()));
        assert_bounds(&reading);
    }

    #[test]
    fn fusion_never_hurts(seed in any::<u64>(), variant in variant(), laser in 0.0f64..=100.0, infrared in 0.0f64..=100.0) {
        let synth = MetricSynthesizer::seeded(variant, seed);
        let fused = synth.fuse(laser, infrared);
        prop_assert!(fused >= laser.max(infrared));
        prop_assert!(fused <= 100.0);
    }

    #[test]
    fn store_never_exceeds_cap(boats in 1usize..6, rows in 1usize..40, ticks in 0usize..300) {
        let (mut hub, clock) = hub(3);
        hub.load_snapshot(&snapshot(boats, rows));
        for _ in 0..ticks {
            clock.advance(Duration::seconds(3));
            hub.tick();
        }
        prop_assert!(hub.readings().len() <= 1000);
    }

    #[test]
    fn validation_absent_below_five(n in 0usize..5) {
        let (mut hub, _) = hub(4);
        for i in 0..n {
            hub.insert(scored("B1", start() + Duration::seconds(i as i64), 80, 90.0, 85.0, 92.0));
        }
        prop_assert!(hub.validate_accuracy("B1").is_none());
    }

    #[test]
    fn validation_figures_in_range(seed in any::<u64>(), ticks in 5usize..30) {
        let (mut hub, clock) = hub(seed);
        hub.load_snapshot(&snapshot(1, 1));
        for _ in 0..ticks {
            clock.advance(Duration::seconds(3));
            hub.tick();
        }
        let report = hub.validate_accuracy("B1").expect("enough readings");
        prop_assert!((0.0..=1.0).contains(&report.fusion.reliability_score));
        prop_assert!(report.fusion.improvement_over_individual >= 0.0);
    }

    #[test]
    fn export_then_parse_keeps_base_fields(seed in any::<u64>(), samples in prop::collection::vec(any_sample(), 0..40)) {
        let mut synth = MetricSynthesizer::seeded(ScoringVariant::ClassicDualChannel, seed);
        let readings: Vec<Reading> = samples.iter().cloned().map(|s| synth.synthesize(s)).collect();

        let (parsed, stats) = parse_snapshot(&export_csv(&readings));
        prop_assert_eq!(stats.rows_read, readings.len());
        prop_assert_eq!(stats.skipped_rows, 0);
        prop_assert_eq!(parsed, samples);
    }
}
