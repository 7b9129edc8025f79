//! Fleet-wide views
//!
//! Aggregates over the latest reading of every known boat (the overview
//! tiles), per-boat concentration trends, and map marker data.

use serde::Serialize;

use crate::constants::buffers::TREND_WINDOW;
use crate::constants::fleet::{
    CHANNELS_PER_BOAT, CONCENTRATION_ELEVATED_PPM, CONCENTRATION_HIGH_PPM,
    CONCENTRATION_MODERATE_PPM, HEATMAP_SATURATION_PPM, SENSOR_POWERED_MIN_PCT,
    TREND_DEADBAND_PPM,
};
use crate::reading::Reading;
use crate::status::{boat_status, BoatStatus};
use crate::store::ReadingStore;
use crate::time::Timestamp;

use super::stats::{finite, mean, mean_or_zero};

/// Overview figures across the fleet
///
/// All zero for an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FleetSnapshot {
    /// Boats with at least one reading
    pub boats: usize,
    /// Sum of latest collected volumes (ml)
    pub total_volume_ml: u64,
    /// Mean latest battery (percent)
    pub average_battery: f64,
    /// Highest latest concentration (ppm)
    pub max_concentration_ppm: f64,
    /// Mean latest concentration (ppm)
    pub average_concentration_ppm: f64,
    /// Mean latest particle size (µm)
    pub average_particle_size_microns: f64,
    /// Mean latest laser score
    pub average_laser_accuracy: f64,
    /// Mean latest infrared score
    pub average_infrared_accuracy: f64,
    /// Mean latest fused score
    pub average_fused_accuracy: f64,
    /// Channels on boats with battery above 20%
    pub active_sensors: usize,
}

impl FleetSnapshot {
    /// Aggregate a set of latest readings
    pub fn from_latest(latest: &[&Reading]) -> Self {
        if latest.is_empty() {
            return Self::default();
        }
        let collect = |f: fn(&Reading) -> f64| latest.iter().map(|r| f(r)).collect::<Vec<f64>>();

        let concentrations = finite(latest.iter().map(|r| r.sample.concentration_ppm));
        let max_concentration = concentrations.iter().copied().fold(0.0_f64, f64::max);

        Self {
            boats: latest.len(),
            total_volume_ml: latest
                .iter()
                .map(|r| u64::from(r.sample.collection_volume_ml))
                .sum(),
            average_battery: mean_or_zero(&collect(|r| f64::from(r.sample.battery_status))),
            max_concentration_ppm: max_concentration,
            average_concentration_ppm: mean_or_zero(&concentrations),
            average_particle_size_microns: mean_or_zero(&collect(|r| r.sample.particle_size_microns)),
            average_laser_accuracy: mean_or_zero(&collect(|r| r.metrics.laser_accuracy)),
            average_infrared_accuracy: mean_or_zero(&collect(|r| r.metrics.infrared_accuracy)),
            average_fused_accuracy: mean_or_zero(&collect(|r| r.metrics.fused_accuracy)),
            active_sensors: latest
                .iter()
                .filter(|r| f64::from(r.sample.battery_status) > SENSOR_POWERED_MIN_PCT)
                .count()
                * CHANNELS_PER_BOAT,
        }
    }
}

/// Fleet snapshot over the store's latest readings
pub fn fleet_snapshot(store: &ReadingStore) -> FleetSnapshot {
    FleetSnapshot::from_latest(&store.latest_per_boat())
}

/// Direction of a boat's concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Recent mean more than 0.1 ppm above the earlier mean
    Up,
    /// Recent mean more than 0.1 ppm below the earlier mean
    Down,
    /// Within 0.1 ppm
    Stable,
}

/// Concentration trend from the last six readings, absent with fewer
///
/// Compares the mean of the newest three against the three before them.
pub fn concentration_trend(store: &ReadingStore, boat_id: &str) -> Option<Trend> {
    let window = store.recent(boat_id, TREND_WINDOW);
    if window.len() < TREND_WINDOW {
        return None;
    }
    let half = TREND_WINDOW / 2;
    let values: Vec<f64> = window.iter().map(|r| r.sample.concentration_ppm).collect();
    let earlier = mean(&values[..half])?;
    let recent = mean(&values[half..])?;

    Some(if recent > earlier + TREND_DEADBAND_PPM {
        Trend::Up
    } else if recent < earlier - TREND_DEADBAND_PPM {
        Trend::Down
    } else {
        Trend::Stable
    })
}

/// Map colour band for a concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcentrationBand {
    /// Above 4 ppm
    High,
    /// Above 2 ppm
    Elevated,
    /// Above 1 ppm
    Moderate,
    /// 1 ppm or less
    Low,
}

impl ConcentrationBand {
    /// Band for a concentration in ppm (NaN is `Low`)
    pub fn of(ppm: f64) -> Self {
        if ppm > CONCENTRATION_HIGH_PPM {
            ConcentrationBand::High
        } else if ppm > CONCENTRATION_ELEVATED_PPM {
            ConcentrationBand::Elevated
        } else if ppm > CONCENTRATION_MODERATE_PPM {
            ConcentrationBand::Moderate
        } else {
            ConcentrationBand::Low
        }
    }
}

/// Heat-map opacity in [0, 1] for a concentration
pub fn heatmap_opacity(ppm: f64) -> f64 {
    if ppm.is_finite() {
        (ppm / HEATMAP_SATURATION_PPM).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One boat marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPosition {
    /// Boat id
    pub boat_id: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub long: f64,
    /// Latest concentration (ppm)
    pub concentration_ppm: f64,
    /// Current status
    pub status: BoatStatus,
    /// Colour band
    pub band: ConcentrationBand,
    /// Heat-map ring opacity
    pub opacity: f64,
}

/// Markers for every known boat, in first-appearance order
pub fn map_positions(store: &ReadingStore, now: Timestamp) -> Vec<MapPosition> {
    store
        .latest_per_boat()
        .into_iter()
        .map(|r| MapPosition {
            boat_id: r.boat_id().to_string(),
            lat: r.sample.gps_lat,
            long: r.sample.gps_long,
            concentration_ppm: r.sample.concentration_ppm,
            status: boat_status(Some(r), now),
            band: ConcentrationBand::of(r.sample.concentration_ppm),
            opacity: heatmap_opacity(r.sample.concentration_ppm),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_exclusive_above() {
        assert_eq!(ConcentrationBand::of(4.5), ConcentrationBand::High);
        assert_eq!(ConcentrationBand::of(4.0), ConcentrationBand::Elevated);
        assert_eq!(ConcentrationBand::of(1.5), ConcentrationBand::Moderate);
        assert_eq!(ConcentrationBand::of(1.0), ConcentrationBand::Low);
        assert_eq!(ConcentrationBand::of(f64::NAN), ConcentrationBand::Low);
    }

    #[test]
    fn opacity_saturates() {
        assert_eq!(heatmap_opacity(2.5), 0.5);
        assert_eq!(heatmap_opacity(9.0), 1.0);
        assert_eq!(heatmap_opacity(f64::NAN), 0.0);
    }

    #[test]
    fn empty_fleet_is_zeroed() {
        let store = ReadingStore::new();
        assert_eq!(fleet_snapshot(&store), FleetSnapshot::default());
        assert!(concentration_trend(&store, "B1").is_none());
    }
}
