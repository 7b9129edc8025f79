//! Buffer Sizes and Window Limits
//!
//! The dataset is deliberately small: the whole fleet history fits in one
//! bounded buffer and every query is a linear scan over it.

/// Maximum readings kept across all boats; the oldest are evicted first.
pub const MAX_STORED_READINGS: usize = 1000;

/// Readings per boat considered by rolling-window validation.
pub const VALIDATION_WINDOW: usize = 10;

/// Minimum readings in the window before statistics are reported.
///
/// Fewer than this and a standard deviation is meaningless, so the
/// validation query reports "insufficient data" instead.
pub const MIN_VALIDATION_SAMPLES: usize = 5;

/// Readings per boat used to compute a concentration trend (two halves of 3).
pub const TREND_WINDOW: usize = 6;

/// Alerts retained by the alert log.
pub const ALERT_LOG_CAPACITY: usize = 10;

/// Maximum CSV fields read from one snapshot row.
pub const MAX_CSV_FIELDS: usize = 16;

/// Number of columns in a snapshot row.
pub const SNAPSHOT_COLUMNS: usize = 10;
