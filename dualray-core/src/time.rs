//! Time sources for the telemetry engine
//!
//! Provides clock abstraction so staleness checks and tick timestamps can
//! run against either the wall clock or a controllable test clock:
//! - System clock (production)
//! - Fixed clock (tests, replays)

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Instant type used throughout the engine
pub type Timestamp = DateTime<Utc>;

/// Source of "now" for the engine
pub trait TimeSource: Send + Sync {
    /// Current instant
    fn now(&self) -> Timestamp;

    /// Check if this source follows the wall clock
    fn is_wall_clock(&self) -> bool;
}

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Manually driven time source for testing
///
/// Clones share the same instant, so a test can keep one handle and move
/// time forward while the hub owns another.
#[derive(Debug, Clone)]
pub struct FixedClock {
    millis: Arc<AtomicI64>,
}

impl FixedClock {
    /// Create a clock frozen at `at`
    pub fn new(at: Timestamp) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(at.timestamp_millis())),
        }
    }

    /// Jump to an absolute instant
    pub fn set(&self, at: Timestamp) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move forward by `by`
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        let millis = self.millis.load(Ordering::SeqCst);
        // Out-of-range millis can only come from a pathological advance()
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Milliseconds elapsed from `earlier` to `later` (negative if reversed)
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> i64 {
    (later - earlier).num_milliseconds()
}
