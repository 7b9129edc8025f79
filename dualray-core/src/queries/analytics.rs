//! Analytics over a time range
//!
//! Filters the history to a trailing window and summarizes it for the
//! analytics charts: overall concentration statistics and an hour-of-day
//! profile.

use core::str::FromStr;

use chrono::{Duration, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::time::{MS_PER_DAY, MS_PER_HOUR};
use crate::errors::{TelemetryError, TelemetryResult};
use crate::reading::Reading;
use crate::store::ReadingStore;
use crate::time::Timestamp;

use super::stats::{mean_or_zero, Statistics};

/// Trailing window selectable on the analytics view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last hour
    #[serde(rename = "1h")]
    LastHour,
    /// Last 6 hours
    #[serde(rename = "6h")]
    LastSixHours,
    /// Last 24 hours
    #[default]
    #[serde(rename = "24h")]
    LastDay,
    /// Last 7 days
    #[serde(rename = "7d")]
    LastWeek,
}

impl TimeRange {
    /// Window length in milliseconds
    pub const fn millis(self) -> i64 {
        match self {
            TimeRange::LastHour => MS_PER_HOUR,
            TimeRange::LastSixHours => 6 * MS_PER_HOUR,
            TimeRange::LastDay => MS_PER_DAY,
            TimeRange::LastWeek => 7 * MS_PER_DAY,
        }
    }

    /// Window length
    pub fn duration(self) -> Duration {
        Duration::milliseconds(self.millis())
    }

    /// Short code ("1h", "6h", "24h", "7d")
    pub const fn code(self) -> &'static str {
        match self {
            TimeRange::LastHour => "1h",
            TimeRange::LastSixHours => "6h",
            TimeRange::LastDay => "24h",
            TimeRange::LastWeek => "7d",
        }
    }
}

impl FromStr for TimeRange {
    type Err = TelemetryError;

    fn from_str(s: &str) -> TelemetryResult<Self> {
        match s.trim() {
            "1h" => Ok(TimeRange::LastHour),
            "6h" => Ok(TimeRange::LastSixHours),
            "24h" => Ok(TimeRange::LastDay),
            "7d" => Ok(TimeRange::LastWeek),
            _ => Err(TelemetryError::InvalidSetting {
                name: "timeRange",
                reason: "expected one of 1h, 6h, 24h, 7d",
            }),
        }
    }
}

/// Readings strictly newer than `now - range`, oldest first
pub fn readings_within(store: &ReadingStore, range: TimeRange, now: Timestamp) -> Vec<&Reading> {
    let cutoff = now - range.duration();
    store.iter().filter(|r| r.timestamp() > cutoff).collect()
}

/// Concentration statistics over a set of readings, absent when empty
pub fn concentration_statistics<'a, I>(readings: I) -> Option<Statistics>
where
    I: IntoIterator<Item = &'a Reading>,
{
    Statistics::from_values(readings.into_iter().map(|r| r.sample.concentration_ppm))
}

/// Aggregates for one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyBucket {
    /// Hour of day, UTC (0-23)
    pub hour: u32,
    /// Readings that fell in this hour
    pub readings: usize,
    /// Mean concentration (ppm)
    pub average_concentration_ppm: f64,
    /// Mean particle size (µm)
    pub average_particle_size_microns: f64,
    /// Total collected volume (ml)
    pub total_volume_ml: u64,
}

/// Group readings by UTC hour of day, ascending by hour
///
/// Readings from different days that share an hour land in the same
/// bucket. Hours with no readings are omitted.
pub fn hourly_profile<'a, I>(readings: I) -> Vec<HourlyBucket>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut concentration: [Vec<f64>; 24] = Default::default();
    let mut particle: [Vec<f64>; 24] = Default::default();
    let mut volume = [0u64; 24];

    for reading in readings {
        let hour = reading.timestamp().hour() as usize;
        concentration[hour].push(reading.sample.concentration_ppm);
        particle[hour].push(reading.sample.particle_size_microns);
        volume[hour] += u64::from(reading.sample.collection_volume_ml);
    }

    (0..24)
        .filter(|&h| !concentration[h].is_empty())
        .map(|h| HourlyBucket {
            hour: h as u32,
            readings: concentration[h].len(),
            average_concentration_ppm: mean_or_zero(&concentration[h]),
            average_particle_size_microns: mean_or_zero(&particle[h]),
            total_volume_ml: volume[h],
        })
        .collect()
}
