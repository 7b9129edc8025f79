//! Constants for DualRay Core
//!
//! Centralised, documented constants for every threshold, cap and interval
//! the engine applies. Keeping them here means the synthesizer, boat status
//! and validation queries all read the same numbers.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Quality**: channel score bands, status cutoffs, validation tiers
//! - **Fleet**: boat health thresholds and alert defaults
//! - **Time**: staleness, tick cadence and analytics windows
//! - **Buffers**: store capacity and window sizes

/// Channel score bands, status cutoffs and validation tiers.
pub mod quality;

/// Boat health thresholds and alert defaults.
pub mod fleet;

/// Staleness, tick cadence and analytics windows.
pub mod time;

/// Store capacity and rolling window sizes.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use buffers::{MAX_STORED_READINGS, MIN_VALIDATION_SAMPLES, VALIDATION_WINDOW};
pub use fleet::{LOW_BATTERY_WARNING_PCT, MIN_HEALTHY_FUSED_SCORE};
pub use quality::{
    INFRARED_ACTIVE_MIN, INFRARED_DEGRADED_MIN, LASER_ACTIVE_MIN, LASER_DEGRADED_MIN,
};
pub use time::{DEFAULT_TICK_INTERVAL_MS, STALE_AFTER_MS};
