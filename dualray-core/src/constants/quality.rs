//! Channel Quality Bands and Thresholds
//!
//! Scores are percentages in [0, 100]. The same cutoffs are used when the
//! synthesizer labels a channel and when boat status inspects that label,
//! so a channel can never be "active" in one view and "degraded" in another.

// ===== PERCENT RANGE =====

/// Lower bound of every percentage-valued metric.
pub const PERCENT_MIN: f64 = 0.0;

/// Upper bound of every percentage-valued metric.
pub const PERCENT_MAX: f64 = 100.0;

// ===== CHANNEL STATUS CUTOFFS =====

/// Laser score at or above which the channel is `active`.
pub const LASER_ACTIVE_MIN: f64 = 85.0;

/// Laser score at or above which the channel is `degraded` (below: `offline`).
pub const LASER_DEGRADED_MIN: f64 = 70.0;

/// Infrared score at or above which the channel is `active`.
///
/// Lower than the laser cutoff: NIR absorption runs a few points below
/// scattering on the same hardware.
pub const INFRARED_ACTIVE_MIN: f64 = 80.0;

/// Infrared score at or above which the channel is `degraded`.
pub const INFRARED_DEGRADED_MIN: f64 = 65.0;

// ===== VALIDATION TIERS =====

/// Laser window mean above which the channel is `optimal`.
pub const LASER_OPTIMAL_MEAN: f64 = 85.0;

/// Laser window mean above which the channel is `acceptable`.
pub const LASER_ACCEPTABLE_MEAN: f64 = 75.0;

/// Infrared window mean above which the channel is `optimal`.
pub const INFRARED_OPTIMAL_MEAN: f64 = 80.0;

/// Infrared window mean above which the channel is `acceptable`.
pub const INFRARED_ACCEPTABLE_MEAN: f64 = 70.0;

/// Standard deviation below which a channel counts as stable.
pub const STABLE_STD_DEV_MAX: f64 = 3.0;

/// Std-dev scale used by the reliability score: `1 - std / scale`.
pub const RELIABILITY_STD_DEV_SCALE: f64 = 10.0;

/// Fused mean above which the system is "performing optimally".
pub const FUSED_OPTIMAL_MEAN: f64 = 90.0;

/// Fused mean above which recalibration is only advised.
pub const FUSED_RECALIBRATE_MEAN: f64 = 80.0;
