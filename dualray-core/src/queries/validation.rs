//! Rolling-Window Accuracy Validation
//!
//! ## Overview
//!
//! Looks at a boat's most recent readings (10 at most) and reports, per
//! channel, the mean score, its spread and a tier, plus how much fusion
//! adds over the better channel and an overall reliability figure.
//!
//! ## Insufficient Data
//!
//! With fewer than 5 usable readings the report is absent. A standard
//! deviation over two or three samples says nothing about stability, and a
//! dashboard showing "Stable" for a boat that just came online would be
//! misleading. Readings with a non-finite score are left out of the window
//! count.
//!
//! ## Figures
//!
//! ```text
//! improvement = max(0, fused_mean − max(laser_mean, infrared_mean))
//! reliability = (fused_mean / 100) × (1 − max(laser_sd, infrared_sd) / 10)
//! ```
//!
//! Reliability is clamped to [0, 1]; a spread above 10 points would
//! otherwise drive it negative.

use serde::Serialize;

use crate::constants::buffers::{MIN_VALIDATION_SAMPLES, VALIDATION_WINDOW};
use crate::constants::quality::{
    FUSED_OPTIMAL_MEAN, FUSED_RECALIBRATE_MEAN, INFRARED_ACCEPTABLE_MEAN, INFRARED_OPTIMAL_MEAN,
    LASER_ACCEPTABLE_MEAN, LASER_OPTIMAL_MEAN, RELIABILITY_STD_DEV_SCALE, STABLE_STD_DEV_MAX,
};
use crate::reading::Reading;
use crate::store::ReadingStore;

use super::stats::{mean, population_std_dev};

/// Whether a channel's score is holding steady
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// Standard deviation below 3 points
    Stable,
    /// Standard deviation of 3 points or more
    Unstable,
}

/// Mean-score tier of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    /// Above the optimal cutoff
    Optimal,
    /// Above the acceptable cutoff
    Acceptable,
    /// Everything else
    Poor,
}

impl PerformanceTier {
    fn classify(mean: f64, optimal: f64, acceptable: f64) -> Self {
        if mean > optimal {
            PerformanceTier::Optimal
        } else if mean > acceptable {
            PerformanceTier::Acceptable
        } else {
            PerformanceTier::Poor
        }
    }
}

/// Window statistics for one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelValidation {
    /// Mean score over the window
    pub average_accuracy: f64,
    /// Population standard deviation over the window
    pub standard_deviation: f64,
    /// Stability class
    pub stability: Stability,
    /// Mean-score tier
    pub status: PerformanceTier,
}

/// Window statistics for the fused score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionValidation {
    /// Mean fused score over the window
    pub average_accuracy: f64,
    /// Points the fused mean sits above the better channel mean
    pub improvement_over_individual: f64,
    /// Combined reliability in [0, 1]
    pub reliability_score: f64,
    /// Operator guidance for the current tier
    pub recommendation: &'static str,
}

/// Rolling-window validation for one boat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Laser channel
    pub laser: ChannelValidation,
    /// Infrared channel
    pub infrared: ChannelValidation,
    /// Fused score
    pub fusion: FusionValidation,
}

/// Recommendation for a fused mean
pub fn recommendation(fused_mean: f64) -> &'static str {
    if fused_mean > FUSED_OPTIMAL_MEAN {
        "System performing optimally"
    } else if fused_mean > FUSED_RECALIBRATE_MEAN {
        "Consider recalibration"
    } else {
        "Immediate maintenance required"
    }
}

/// Validate a boat's recent readings
pub fn validate_accuracy(store: &ReadingStore, boat_id: &str) -> Option<ValidationReport> {
    validate_window(store.recent(boat_id, VALIDATION_WINDOW))
}

/// Validate an explicit window (oldest first)
///
/// Only the last 10 readings are considered. Absent if fewer than 5 of
/// them carry finite scores.
pub fn validate_window<'a, I>(window: I) -> Option<ValidationReport>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let all: Vec<&Reading> = window.into_iter().collect();
    let start = all.len().saturating_sub(VALIDATION_WINDOW);

    let mut laser: heapless::Vec<f64, VALIDATION_WINDOW> = heapless::Vec::new();
    let mut infrared: heapless::Vec<f64, VALIDATION_WINDOW> = heapless::Vec::new();
    let mut fused: heapless::Vec<f64, VALIDATION_WINDOW> = heapless::Vec::new();

    for reading in &all[start..] {
        let m = &reading.metrics;
        if !(m.laser_accuracy.is_finite()
            && m.infrared_accuracy.is_finite()
            && m.fused_accuracy.is_finite())
        {
            continue;
        }
        // Capacity equals the window length, so these cannot overflow
        let _ = laser.push(m.laser_accuracy);
        let _ = infrared.push(m.infrared_accuracy);
        let _ = fused.push(m.fused_accuracy);
    }

    if laser.len() < MIN_VALIDATION_SAMPLES {
        return None;
    }

    let laser = channel(&laser, LASER_OPTIMAL_MEAN, LASER_ACCEPTABLE_MEAN)?;
    let infrared = channel(&infrared, INFRARED_OPTIMAL_MEAN, INFRARED_ACCEPTABLE_MEAN)?;
    let fused_mean = mean(&fused)?;

    let improvement = (fused_mean - laser.average_accuracy.max(infrared.average_accuracy)).max(0.0);
    let worst_spread = laser.standard_deviation.max(infrared.standard_deviation);
    let reliability =
        ((fused_mean / 100.0) * (1.0 - worst_spread / RELIABILITY_STD_DEV_SCALE)).clamp(0.0, 1.0);

    Some(ValidationReport {
        laser,
        infrared,
        fusion: FusionValidation {
            average_accuracy: fused_mean,
            improvement_over_individual: improvement,
            reliability_score: reliability,
            recommendation: recommendation(fused_mean),
        },
    })
}

fn channel(values: &[f64], optimal: f64, acceptable: f64) -> Option<ChannelValidation> {
    let average = mean(values)?;
    let sd = population_std_dev(values)?;
    Some(ChannelValidation {
        average_accuracy: average,
        standard_deviation: sd,
        stability: if sd < STABLE_STD_DEV_MAX {
            Stability::Stable
        } else {
            Stability::Unstable
        },
        status: PerformanceTier::classify(average, optimal, acceptable),
    })
}
