//! Time-Related Constants
//!
//! Staleness limits, tick cadence and the windows used by analytics.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;

/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Milliseconds per day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

// ===== LIVENESS =====

/// A boat whose latest reading is older than this is `offline` (5 minutes).
pub const STALE_AFTER_MS: i64 = 5 * MS_PER_MINUTE;

/// Window used by the data-integrity health indicator (5 minutes).
pub const HEALTH_WINDOW_MS: i64 = 5 * MS_PER_MINUTE;

/// Readings expected across the fleet in one health window.
///
/// Five boats reporting every 3 s would give far more; the dashboard was
/// tuned against 25, so that is what 100% integrity means.
pub const EXPECTED_READINGS_PER_HEALTH_WINDOW: f64 = 25.0;

// ===== SYNTHESIS CADENCE =====

/// Interval between synthesis ticks (milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3000;
