//! Metric Synthesis for Dual-Wavelength Sensor Readings
//!
//! ## Overview
//!
//! There is no optical hardware behind the fleet dashboard. Every quality
//! metric on a reading is synthesized here, either from the base fields of
//! a freshly parsed snapshot row or from bounded random draws when a live
//! update is produced from a boat's previous reading.
//!
//! ## Scoring Pipeline
//!
//! ```text
//! battery ──► laser score ────┐
//!                             ├─► fused = max(strongest, min(cap, mean + bonus))
//! ppm ──────► infrared score ─┘          │
//!                                        ├─► detection confidence
//!                                        └─► calibration status
//! ```
//!
//! 1. **Laser**: baseline plus a battery-proportional term (snapshot) or a
//!    uniform draw (live), capped by the variant profile.
//! 2. **Infrared**: baseline plus a concentration-proportional term
//!    (snapshot) or a uniform draw (live), capped.
//! 3. **Fused**: channel mean plus a fixed bonus, capped, and never below
//!    the stronger channel.
//! 4. **Status**: each channel thresholded against its active/degraded
//!    cutoffs from [`crate::constants::quality`].
//! 5. **Environment**: temperature in [20, 35] °C, turbidity in [0, 0.5].
//! 6. **Confidence**: fused score plus a small draw, capped.
//!
//! ## Guarantees
//!
//! - Every percentage output passes through [`clamp_percent`], so corrupt
//!   inputs (negative battery, NaN concentration) still yield scores in
//!   [0, 100].
//! - `fused >= max(laser, infrared)` for every reading produced here.
//! - With a seeded generator the output is fully deterministic.
//!
//! ```rust
//! use dualray_core::synth::{MetricSynthesizer, ScoringVariant};
//!
//! let synth = MetricSynthesizer::seeded(ScoringVariant::ClassicDualChannel, 42);
//! let fused = synth.fuse(95.0, 80.0);
//! assert!(fused >= 95.0);
//! ```

mod variant;

pub use variant::{MetricLabels, ScoringProfile, ScoringVariant};

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::quality::{PERCENT_MAX, PERCENT_MIN};
use crate::reading::{CalibrationStatus, ChannelStatus, DerivedMetrics, Reading, Sample};
use crate::time::Timestamp;

/// Lowest sensor housing temperature produced (°C)
pub const SENSOR_TEMPERATURE_MIN_C: f64 = 20.0;

/// Highest sensor housing temperature produced (°C)
pub const SENSOR_TEMPERATURE_MAX_C: f64 = 35.0;

/// Highest water turbidity produced (unitless)
pub const WATER_TURBIDITY_MAX: f64 = 0.5;

/// Smallest particle size a live update can drift to (µm)
const MIN_PARTICLE_MICRONS: f64 = 1.0;

/// Max particle-size step per live update (µm, full width)
const PARTICLE_STEP_MICRONS: f64 = 5.0;

/// Max concentration step per live update (ppm, full width)
const CONCENTRATION_STEP_PPM: f64 = 0.5;

/// Battery step width per live update (percent)
const BATTERY_STEP_PCT: f64 = 2.0;

/// Centre of the battery draw; above 0.5 so batteries drain on average
const BATTERY_DRAIN_BIAS: f64 = 0.7;

/// Clamp a percentage into [0, 100]; NaN becomes 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        PERCENT_MIN
    } else {
        value.clamp(PERCENT_MIN, PERCENT_MAX)
    }
}

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Derives quality metrics for readings
///
/// Owns its random generator so tests can inject a seeded one and assert
/// exact outputs.
#[derive(Debug, Clone)]
pub struct MetricSynthesizer<R: Rng = StdRng> {
    rng: R,
    variant: ScoringVariant,
    profile: ScoringProfile,
}

impl MetricSynthesizer<StdRng> {
    /// Synthesizer seeded from OS entropy
    pub fn new(variant: ScoringVariant) -> Self {
        Self::with_rng(variant, StdRng::from_entropy())
    }

    /// Deterministic synthesizer
    pub fn seeded(variant: ScoringVariant, seed: u64) -> Self {
        Self::with_rng(variant, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MetricSynthesizer<R> {
    /// Synthesizer drawing from the given generator
    pub fn with_rng(variant: ScoringVariant, rng: R) -> Self {
        Self {
            rng,
            variant,
            profile: variant.profile(),
        }
    }

    /// Switch scoring variant, keeping the generator state
    pub fn with_variant(mut self, variant: ScoringVariant) -> Self {
        self.variant = variant;
        self.profile = variant.profile();
        self
    }

    /// Active scoring variant
    pub fn variant(&self) -> ScoringVariant {
        self.variant
    }

    /// Active scoring parameters
    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Build a reading for a freshly parsed snapshot sample
    ///
    /// Laser quality follows battery charge and infrared quality follows
    /// concentration; non-finite inputs contribute nothing, leaving the
    /// channel at its baseline.
    pub fn synthesize(&mut self, sample: Sample) -> Reading {
        let p = self.profile;
        let battery = f64::from(sample.battery_status);
        let concentration = finite_or_zero(sample.concentration_ppm);

        let laser = (p.laser_base + battery / 100.0 * p.laser_span).min(p.laser_cap);
        let infrared = (p.infrared_base + concentration / p.infrared_reference_ppm * p.infrared_span)
            .min(p.infrared_cap);

        let metrics = self.derive(laser, infrared);
        Reading::new(sample, metrics)
    }

    /// Produce the next live reading for a boat from its previous one
    ///
    /// Particle size, concentration and battery drift by bounded steps;
    /// position, depth, volume and power source carry over. Channel scores
    /// are drawn fresh rather than walked from the previous tick.
    pub fn perturb(&mut self, previous: &Reading, at: Timestamp) -> Reading {
        let prev = &previous.sample;

        let particle = (prev.particle_size_microns
            + (self.rng.gen::<f64>() - 0.5) * PARTICLE_STEP_MICRONS)
            .max(MIN_PARTICLE_MICRONS);
        let concentration = (prev.concentration_ppm
            + (self.rng.gen::<f64>() - 0.5) * CONCENTRATION_STEP_PPM)
            .max(0.0);
        let battery = (f64::from(prev.battery_status)
            + (self.rng.gen::<f64>() - BATTERY_DRAIN_BIAS) * BATTERY_STEP_PCT)
            .clamp(PERCENT_MIN, PERCENT_MAX)
            .round() as u8;

        let sample = Sample {
            timestamp: at,
            particle_size_microns: particle,
            concentration_ppm: concentration,
            battery_status: battery,
            ..prev.clone()
        };

        let p = self.profile;
        let laser = (p.laser_base + self.rng.gen::<f64>() * p.laser_span).min(p.laser_cap);
        let infrared =
            (p.infrared_base + self.rng.gen::<f64>() * p.infrared_span).min(p.infrared_cap);

        let metrics = self.derive(laser, infrared);
        trace!(
            "synthesized {} laser={:.1} infrared={:.1} fused={:.1}",
            sample.boat_id,
            metrics.laser_accuracy,
            metrics.infrared_accuracy,
            metrics.fused_accuracy
        );
        Reading::new(sample, metrics)
    }

    /// Fuse two channel scores
    ///
    /// Mean plus bonus, capped by the profile, then lifted to the stronger
    /// channel so fusion never reports less than its best input.
    pub fn fuse(&self, laser: f64, infrared: f64) -> f64 {
        let laser = clamp_percent(laser);
        let infrared = clamp_percent(infrared);
        let blended = ((laser + infrared) / 2.0 + self.profile.fusion_bonus)
            .min(self.profile.fused_cap);
        clamp_percent(blended.max(laser.max(infrared)))
    }

    fn derive(&mut self, laser: f64, infrared: f64) -> DerivedMetrics {
        let laser = clamp_percent(laser);
        let infrared = clamp_percent(infrared);
        let fused = self.fuse(laser, infrared);

        let laser_signal = self.signal_strength(laser);
        let infrared_signal = self.signal_strength(infrared);

        let sensor_temperature = SENSOR_TEMPERATURE_MIN_C
            + self.rng.gen::<f64>() * (SENSOR_TEMPERATURE_MAX_C - SENSOR_TEMPERATURE_MIN_C);
        let water_turbidity = self.rng.gen::<f64>() * WATER_TURBIDITY_MAX;

        let detection_confidence = clamp_percent(
            (fused + self.rng.gen::<f64>() * self.profile.confidence_span)
                .min(self.profile.confidence_cap),
        );

        DerivedMetrics {
            laser_accuracy: laser,
            infrared_accuracy: infrared,
            fused_accuracy: fused,
            laser_signal_strength: laser_signal,
            infrared_signal_strength: infrared_signal,
            laser_status: ChannelStatus::laser(laser),
            infrared_status: ChannelStatus::infrared(infrared),
            calibration_status: CalibrationStatus::from_fused(fused),
            sensor_temperature,
            water_turbidity,
            detection_confidence,
        }
    }

    fn signal_strength(&mut self, score: f64) -> f64 {
        let spread = self.profile.signal_spread;
        clamp_percent(score - spread / 2.0 + self.rng.gen::<f64>() * spread)
    }
}
