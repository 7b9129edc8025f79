//! Data-integrity health indicator
//!
//! Compares how many readings arrived in the last five minutes with the
//! 25 the fleet is expected to deliver in that window.

use serde::Serialize;

use crate::constants::time::{EXPECTED_READINGS_PER_HEALTH_WINDOW, HEALTH_WINDOW_MS};
use crate::store::ReadingStore;
use crate::time::Timestamp;

/// Grade of the integrity figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    /// Above 90%
    Good,
    /// Above 70%
    Warning,
    /// 70% or less
    Critical,
}

impl HealthGrade {
    /// Grade an integrity percentage
    pub fn of(integrity: f64) -> Self {
        if integrity > 90.0 {
            HealthGrade::Good
        } else if integrity > 70.0 {
            HealthGrade::Warning
        } else {
            HealthGrade::Critical
        }
    }
}

/// Health panel figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemHealth {
    /// Readings newer than five minutes
    pub recent_readings: usize,
    /// Percentage of the expected reading count, capped at 100
    pub data_integrity: f64,
    /// Grade of `data_integrity`
    pub grade: HealthGrade,
    /// When the store last refreshed
    pub last_update: Option<Timestamp>,
}

/// Health of the feed as of `now`
pub fn system_health(store: &ReadingStore, now: Timestamp) -> SystemHealth {
    let cutoff = now - chrono::Duration::milliseconds(HEALTH_WINDOW_MS);
    let recent = store.iter().filter(|r| r.timestamp() > cutoff).count();
    let integrity = (recent as f64 / EXPECTED_READINGS_PER_HEALTH_WINDOW * 100.0).min(100.0);

    SystemHealth {
        recent_readings: recent,
        data_integrity: integrity,
        grade: HealthGrade::of(integrity),
        last_update: store.last_updated(),
    }
}
