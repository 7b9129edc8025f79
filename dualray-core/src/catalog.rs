//! Static reference data
//!
//! Hardware specification of the dual-wavelength sensor head and the
//! explanatory text the technical views show next to live numbers. None of
//! this is derived from readings and none of it changes at runtime.

use serde::Serialize;

use crate::synth::{MetricLabels, ScoringVariant};

/// Cross-validation figures published with the sensor calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyValidation {
    /// k-fold cross-validation score (0-1)
    pub cross_validation_score: f64,
    /// Statistical confidence of the calibration (0-1)
    pub statistical_confidence: f64,
    /// Expected error margin (0-1)
    pub error_margin: f64,
}

/// Hardware specification of the sensor head
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnicalSpecification {
    /// Laser wavelength (nm)
    pub laser_wavelength_nm: u32,
    /// Laser output power (mW)
    pub laser_power_mw: f64,
    /// Infrared wavelength (nm)
    pub infrared_wavelength_nm: u32,
    /// Sampling rate (Hz)
    pub sampling_rate_hz: f64,
    /// Lowest detectable concentration (ppm)
    pub detection_threshold_ppm: f64,
    /// Date of last factory calibration (ISO date)
    pub calibration_date: &'static str,
    /// Name of the fusion algorithm
    pub fusion_algorithm: &'static str,
    /// Published validation figures
    pub accuracy_validation: AccuracyValidation,
}

/// The fleet's sensor specification
pub const TECHNICAL_SPECIFICATION: TechnicalSpecification = TechnicalSpecification {
    laser_wavelength_nm: 650,
    laser_power_mw: 5.0,
    infrared_wavelength_nm: 1550,
    sampling_rate_hz: 10.0,
    detection_threshold_ppm: 0.1,
    calibration_date: "2024-09-01",
    fusion_algorithm: "Weighted Bayesian Fusion with Kalman Filtering",
    accuracy_validation: AccuracyValidation {
        cross_validation_score: 0.94,
        statistical_confidence: 0.96,
        error_margin: 0.05,
    },
};

/// How one sensing channel works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelProfile {
    /// Physical principle
    pub principle: &'static str,
    /// What the channel actually measures
    pub detection_method: &'static str,
    /// Strengths
    pub advantages: &'static [&'static str],
    /// Weaknesses
    pub limitations: &'static [&'static str],
}

/// How the two channels are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FusionProfile {
    /// One-line description of the combination step
    pub method: &'static str,
    /// What fusion adds over either channel
    pub benefits: &'static [&'static str],
}

/// Everything a technical view needs for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantCatalog {
    /// Laser-scattering channel
    pub laser: ChannelProfile,
    /// Infrared-absorption channel
    pub infrared: ChannelProfile,
    /// Fusion step
    pub fusion: FusionProfile,
    /// Metric labels
    pub labels: MetricLabels,
}

const LASER: ChannelProfile = ChannelProfile {
    principle: "Light Scattering Analysis",
    detection_method: "Mie scattering for particle size distribution",
    advantages: &[
        "High precision for particle counting",
        "Real-time detection",
        "Size classification",
    ],
    limitations: &["Affected by water turbidity", "Cannot identify plastic type"],
};

const INFRARED: ChannelProfile = ChannelProfile {
    principle: "Near-Infrared Spectroscopy (NIRS)",
    detection_method: "Chemical fingerprint analysis of C-H bonds",
    advantages: &[
        "Chemical identification",
        "Plastic type classification",
        "Concentration measurement",
    ],
    limitations: &["Lower spatial resolution", "Temperature sensitive"],
};

const CLASSIC_FUSION: FusionProfile = FusionProfile {
    method: "Weighted Bayesian fusion with Kalman filtering for optimal accuracy",
    benefits: &[
        "Combines spatial and chemical data",
        "Reduces false positives",
        "Enhanced reliability",
    ],
};

const UNIFIED_FUSION: FusionProfile = FusionProfile {
    method: "Cross-correlation analysis combines laser scattering and infrared absorption data \
             for comprehensive particle characterization",
    benefits: &[
        "Coaxial dual-beam architecture with shared optical path",
        "Phase-locked detection for noise reduction",
        "Real-time signal fusion",
    ],
};

/// Descriptive text for a scoring variant
pub const fn catalog(variant: ScoringVariant) -> VariantCatalog {
    let fusion = match variant {
        ScoringVariant::ClassicDualChannel => CLASSIC_FUSION,
        ScoringVariant::UnifiedAiFusion => UNIFIED_FUSION,
    };
    VariantCatalog {
        laser: LASER,
        infrared: INFRARED,
        fusion,
        labels: variant.labels(),
    }
}
