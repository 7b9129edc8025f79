//! Latest-reading lookup and accuracy summary

use serde::Serialize;

use crate::reading::Reading;
use crate::store::ReadingStore;

/// Latest channel and fused scores for one boat
///
/// All zero when the boat has no readings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AccuracySummary {
    /// Laser channel score
    pub laser: f64,
    /// Infrared channel score
    pub infrared: f64,
    /// Fused score
    pub fused: f64,
}

impl AccuracySummary {
    /// Summary of one reading
    pub fn of(reading: &Reading) -> Self {
        Self {
            laser: reading.metrics.laser_accuracy,
            infrared: reading.metrics.infrared_accuracy,
            fused: reading.metrics.fused_accuracy,
        }
    }
}

/// Last-appended reading for a boat
pub fn latest_reading<'a>(store: &'a ReadingStore, boat_id: &str) -> Option<&'a Reading> {
    store.latest(boat_id)
}

/// Accuracy summary from a boat's latest reading
pub fn sensor_accuracy(store: &ReadingStore, boat_id: &str) -> AccuracySummary {
    latest_reading(store, boat_id)
        .map(AccuracySummary::of)
        .unwrap_or_default()
}
