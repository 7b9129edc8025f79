//! Technical detail composite
//!
//! Joins the static sensor specification and variant text from
//! [`crate::catalog`] with the live metrics of a boat's latest reading,
//! shaped for the technical dashboard.

use serde::Serialize;

use crate::catalog::{catalog, TechnicalSpecification, TECHNICAL_SPECIFICATION};
use crate::reading::{CalibrationStatus, Reading};
use crate::store::ReadingStore;
use crate::synth::ScoringVariant;

/// Laser channel block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaserDetail {
    /// Wavelength (nm)
    pub wavelength_nm: u32,
    /// Output power (mW)
    pub power_mw: f64,
    /// Latest signal strength
    pub signal_strength: f64,
    /// Latest channel score
    pub accuracy: f64,
    /// Physical principle
    pub principle: &'static str,
    /// Measurement method
    pub detection_method: &'static str,
    /// Strengths
    pub advantages: &'static [&'static str],
    /// Weaknesses
    pub limitations: &'static [&'static str],
}

/// Infrared channel block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfraredDetail {
    /// Wavelength (nm)
    pub wavelength_nm: u32,
    /// Latest signal strength
    pub signal_strength: f64,
    /// Latest channel score
    pub accuracy: f64,
    /// Physical principle
    pub principle: &'static str,
    /// Measurement method
    pub detection_method: &'static str,
    /// Strengths
    pub advantages: &'static [&'static str],
    /// Weaknesses
    pub limitations: &'static [&'static str],
}

/// Fusion block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionDetail {
    /// Algorithm name from the specification
    pub algorithm: &'static str,
    /// Latest fused score
    pub accuracy: f64,
    /// Latest detection confidence
    pub confidence: f64,
    /// Description of the combination step
    pub method: &'static str,
    /// What fusion adds
    pub benefits: &'static [&'static str],
}

/// Environment block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentDetail {
    /// Sensor temperature (°C)
    pub temperature_c: f64,
    /// Water turbidity
    pub turbidity: f64,
    /// Sampling depth (cm)
    pub depth_cm: u32,
    /// Calibration state
    pub calibration_status: CalibrationStatus,
}

/// Everything the technical view shows for one boat
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalDetail {
    /// Laser channel
    pub laser: LaserDetail,
    /// Infrared channel
    pub infrared: InfraredDetail,
    /// Fusion step
    pub fusion: FusionDetail,
    /// Environment at the sensor
    pub environmental: EnvironmentDetail,
}

impl TechnicalDetail {
    /// Assemble the composite for one reading
    pub fn assemble(
        spec: &TechnicalSpecification,
        variant: ScoringVariant,
        reading: &Reading,
    ) -> Self {
        let text = catalog(variant);
        let m = &reading.metrics;
        Self {
            laser: LaserDetail {
                wavelength_nm: spec.laser_wavelength_nm,
                power_mw: spec.laser_power_mw,
                signal_strength: m.laser_signal_strength,
                accuracy: m.laser_accuracy,
                principle: text.laser.principle,
                detection_method: text.laser.detection_method,
                advantages: text.laser.advantages,
                limitations: text.laser.limitations,
            },
            infrared: InfraredDetail {
                wavelength_nm: spec.infrared_wavelength_nm,
                signal_strength: m.infrared_signal_strength,
                accuracy: m.infrared_accuracy,
                principle: text.infrared.principle,
                detection_method: text.infrared.detection_method,
                advantages: text.infrared.advantages,
                limitations: text.infrared.limitations,
            },
            fusion: FusionDetail {
                algorithm: spec.fusion_algorithm,
                accuracy: m.fused_accuracy,
                confidence: m.detection_confidence,
                method: text.fusion.method,
                benefits: text.fusion.benefits,
            },
            environmental: EnvironmentDetail {
                temperature_c: m.sensor_temperature,
                turbidity: m.water_turbidity,
                depth_cm: reading.sample.depth_cm,
                calibration_status: m.calibration_status,
            },
        }
    }
}

/// Technical detail for a boat's latest reading, absent without one
pub fn technical_detail(
    store: &ReadingStore,
    boat_id: &str,
    variant: ScoringVariant,
) -> Option<TechnicalDetail> {
    store
        .latest(boat_id)
        .map(|reading| TechnicalDetail::assemble(&TECHNICAL_SPECIFICATION, variant, reading))
}
