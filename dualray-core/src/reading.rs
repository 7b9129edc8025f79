//! Telemetry reading model
//!
//! A [`Reading`] is one sample from one boat: the base physical fields that
//! arrive in the snapshot ([`Sample`]) plus the quality metrics the
//! synthesizer derives for them ([`DerivedMetrics`]). Readings are never
//! mutated after construction; a live update produces a new reading.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::quality::{
    FUSED_OPTIMAL_MEAN, FUSED_RECALIBRATE_MEAN, INFRARED_ACTIVE_MIN, INFRARED_DEGRADED_MIN,
    LASER_ACTIVE_MIN, LASER_DEGRADED_MIN,
};
use crate::time::Timestamp;

/// How a boat is powered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    /// Solar panels
    Solar,
    /// Hydro-kinetic generator
    Hydro,
    /// Anything else, kept verbatim so exports reproduce the input
    Other(String),
}

impl PowerSource {
    /// Parse a power-source column (case-insensitive for known kinds)
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("solar") {
            PowerSource::Solar
        } else if trimmed.eq_ignore_ascii_case("hydro") {
            PowerSource::Hydro
        } else {
            PowerSource::Other(trimmed.to_string())
        }
    }

    /// Column text for this source
    pub fn as_str(&self) -> &str {
        match self {
            PowerSource::Solar => "solar",
            PowerSource::Hydro => "hydro",
            PowerSource::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PowerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating state of one sensing channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    /// Score at or above the active cutoff
    Active,
    /// Score between the degraded and active cutoffs
    Degraded,
    /// Score below the degraded cutoff
    Offline,
}

impl ChannelStatus {
    /// Threshold a score against a pair of cutoffs
    pub fn from_score(score: f64, active_min: f64, degraded_min: f64) -> Self {
        if score >= active_min {
            ChannelStatus::Active
        } else if score >= degraded_min {
            ChannelStatus::Degraded
        } else {
            ChannelStatus::Offline
        }
    }

    /// Status of the laser channel for a given score
    pub fn laser(score: f64) -> Self {
        Self::from_score(score, LASER_ACTIVE_MIN, LASER_DEGRADED_MIN)
    }

    /// Status of the infrared channel for a given score
    pub fn infrared(score: f64) -> Self {
        Self::from_score(score, INFRARED_ACTIVE_MIN, INFRARED_DEGRADED_MIN)
    }

    /// True for anything other than `Active`
    pub fn is_impaired(self) -> bool {
        self != ChannelStatus::Active
    }
}

/// Calibration state inferred from the fused score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationStatus {
    /// Fused score above 90
    Calibrated,
    /// Fused score above 80: recalibration advised
    Drifting,
    /// Fused score 80 or below: maintenance needed
    Required,
}

impl CalibrationStatus {
    /// Classify a fused score
    pub fn from_fused(fused: f64) -> Self {
        if fused > FUSED_OPTIMAL_MEAN {
            CalibrationStatus::Calibrated
        } else if fused > FUSED_RECALIBRATE_MEAN {
            CalibrationStatus::Drifting
        } else {
            CalibrationStatus::Required
        }
    }
}

/// Base fields exactly as carried by a snapshot row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the sample was taken
    pub timestamp: Timestamp,
    /// Boat identifier (e.g. "B1")
    pub boat_id: String,
    /// Latitude in degrees
    pub gps_lat: f64,
    /// Longitude in degrees
    pub gps_long: f64,
    /// Mean particle size in micrometres
    pub particle_size_microns: f64,
    /// Microplastic concentration in parts per million
    pub concentration_ppm: f64,
    /// Sampling depth in centimetres
    pub depth_cm: u32,
    /// Water collected in millilitres
    pub collection_volume_ml: u32,
    /// Battery charge in percent (0-100)
    pub battery_status: u8,
    /// How the boat is powered
    pub power_source: PowerSource,
}

/// Quality metrics synthesized for a sample
///
/// All scores are percentages in [0, 100]; `fused_accuracy` is never below
/// the stronger of the two channel accuracies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Laser-scattering channel quality score
    pub laser_accuracy: f64,
    /// Infrared-absorption channel quality score
    pub infrared_accuracy: f64,
    /// Combined channel score
    pub fused_accuracy: f64,
    /// Laser return signal strength
    pub laser_signal_strength: f64,
    /// Infrared return signal strength
    pub infrared_signal_strength: f64,
    /// Laser channel state
    pub laser_status: ChannelStatus,
    /// Infrared channel state
    pub infrared_status: ChannelStatus,
    /// Calibration state
    pub calibration_status: CalibrationStatus,
    /// Sensor housing temperature in °C (20-35)
    pub sensor_temperature: f64,
    /// Water turbidity, unitless (0-0.5)
    pub water_turbidity: f64,
    /// Confidence in the detection (0-100)
    pub detection_confidence: f64,
}

impl DerivedMetrics {
    /// Strongest of the two channel scores
    pub fn strongest_channel(&self) -> f64 {
        self.laser_accuracy.max(self.infrared_accuracy)
    }

    /// True when either channel is degraded or offline
    pub fn any_channel_impaired(&self) -> bool {
        self.laser_status.is_impaired() || self.infrared_status.is_impaired()
    }
}

/// One telemetry sample for one boat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Base physical fields
    #[serde(flatten)]
    pub sample: Sample,
    /// Synthesized quality metrics
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl Reading {
    /// Pair a sample with its metrics
    pub fn new(sample: Sample, metrics: DerivedMetrics) -> Self {
        Self { sample, metrics }
    }

    /// Boat this reading belongs to
    pub fn boat_id(&self) -> &str {
        &self.sample.boat_id
    }

    /// When the reading was taken
    pub fn timestamp(&self) -> Timestamp {
        self.sample.timestamp
    }
}
