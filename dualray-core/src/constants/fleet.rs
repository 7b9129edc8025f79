//! Fleet Health Thresholds
//!
//! Battery and score limits that decide a boat's health, plus the default
//! alert thresholds a fresh settings document starts from.

// ===== BOAT STATUS =====

/// Battery percentage below which a boat is in `warning`.
pub const LOW_BATTERY_WARNING_PCT: f64 = 20.0;

/// Fused score below which a boat is in `warning`.
pub const MIN_HEALTHY_FUSED_SCORE: f64 = 85.0;

/// Battery percentage above which a boat's two channels count as live.
pub const SENSOR_POWERED_MIN_PCT: f64 = 20.0;

/// Sensing channels carried by every boat.
pub const CHANNELS_PER_BOAT: usize = 2;

// ===== ALERT DEFAULTS =====

/// Concentration (ppm) above which a high-concentration alert is raised.
pub const DEFAULT_HIGH_CONCENTRATION_PPM: f64 = 4.0;

/// Battery percentage below which a low-battery alert is raised.
pub const DEFAULT_LOW_BATTERY_PCT: u8 = 25;

/// Battery percentage below which a low-battery alert escalates to an error.
pub const CRITICAL_BATTERY_PCT: u8 = 15;

/// Particle size (µm) above which a large-particle notice is raised.
pub const DEFAULT_LARGE_PARTICLE_MICRONS: f64 = 60.0;

// ===== MAP BANDS =====

/// Concentration (ppm) above which a map marker is `high`.
pub const CONCENTRATION_HIGH_PPM: f64 = 4.0;

/// Concentration (ppm) above which a map marker is `elevated`.
pub const CONCENTRATION_ELEVATED_PPM: f64 = 2.0;

/// Concentration (ppm) above which a map marker is `moderate`.
pub const CONCENTRATION_MODERATE_PPM: f64 = 1.0;

/// Concentration (ppm) at which heat-map opacity saturates.
pub const HEATMAP_SATURATION_PPM: f64 = 5.0;

// ===== TRENDS =====

/// Minimum change in mean concentration (ppm) that counts as a trend.
pub const TREND_DEADBAND_PPM: f64 = 0.1;
