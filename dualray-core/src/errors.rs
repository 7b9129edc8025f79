//! Error Types for Telemetry Ingestion and Settings
//!
//! ## Where Errors Can Occur
//!
//! The query layer is total: asking about a boat with no history, or a fleet
//! whose snapshot never loaded, yields zeroed or absent results rather than
//! an error. Errors only exist at the two input boundaries:
//!
//! ### Snapshot Rows
//! - `MalformedRow`: too few fields to place the row on a boat timeline
//! - `InvalidTimestamp`: the timestamp column is not an ISO-8601 instant
//!
//! Row errors are diagnostics. The loader counts and logs them, skips the
//! row, and keeps going, so a single bad line never empties the store.
//!
//! ### Settings Documents
//! - `InvalidSetting`: a value outside its documented range, or an unknown
//!   analytics time-range code
//! - `Settings`: the JSON document could not be decoded or encoded
//!
//! ```rust
//! use dualray_core::{DashboardSettings, TelemetryError};
//!
//! let mut settings = DashboardSettings::default();
//! settings.fusion_weight = 1.5;
//!
//! match settings.validate() {
//!     Err(TelemetryError::InvalidSetting { name, .. }) => assert_eq!(name, "fusionWeight"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Telemetry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
    /// Snapshot row could not be mapped onto the reading layout
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow {
        /// 1-based line number in the snapshot (header is line 1)
        line: usize,
        /// What was wrong with the row
        reason: &'static str,
    },

    /// Timestamp column is not a recognised ISO-8601 form
    #[error("Invalid timestamp at line {line}")]
    InvalidTimestamp {
        /// 1-based line number in the snapshot
        line: usize,
    },

    /// Setting value outside its documented range
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Setting key as it appears in the settings document
        name: &'static str,
        /// Constraint the value violated
        reason: &'static str,
    },

    /// Settings document failed to decode or encode
    #[error("Settings document error: {0}")]
    Settings(String),
}

impl From<serde_json::Error> for TelemetryError {
    fn from(err: serde_json::Error) -> Self {
        TelemetryError::Settings(err.to_string())
    }
}
