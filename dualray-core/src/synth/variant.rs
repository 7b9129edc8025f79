//! Scoring variants
//!
//! The fleet dashboard has shipped two metric vocabularies over time: the
//! classic "laser / infrared / fused accuracy" naming and a later "unified
//! AI fusion" naming. Both describe the same three scores. A variant picks
//! the numeric profile the synthesizer uses and the labels views print;
//! nothing else in the engine branches on it.
//!
//! ```text
//! ClassicDualChannel        UnifiedAiFusion
//! ------------------        ---------------
//! Laser accuracy       ==   Laser signal
//! Infrared accuracy    ==   Infrared signal
//! Fused accuracy       ==   Unified accuracy
//! Detection confidence ==   AI confidence
//! ```

use serde::{Deserialize, Serialize};

/// Metric vocabulary and scoring profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    /// Laser / infrared / fused accuracy (canonical)
    #[default]
    ClassicDualChannel,
    /// Laser signal / infrared signal / unified accuracy
    UnifiedAiFusion,
}

/// Numeric parameters for one variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringProfile {
    /// Laser score floor before battery or random contribution
    pub laser_base: f64,
    /// Laser contribution range on top of the floor
    pub laser_span: f64,
    /// Highest laser score the profile produces
    pub laser_cap: f64,
    /// Infrared score floor
    pub infrared_base: f64,
    /// Infrared contribution range
    pub infrared_span: f64,
    /// Highest infrared score the profile produces
    pub infrared_cap: f64,
    /// Concentration (ppm) at which the infrared contribution is full
    pub infrared_reference_ppm: f64,
    /// Points added to the channel mean when fusing
    pub fusion_bonus: f64,
    /// Ceiling of the fused blend (the strongest channel may still exceed it)
    pub fused_cap: f64,
    /// Random headroom added to the fused score for detection confidence
    pub confidence_span: f64,
    /// Ceiling of detection confidence
    pub confidence_cap: f64,
    /// Width of the signal-strength jitter band around a channel score
    pub signal_spread: f64,
}

/// Display labels for the four headline metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricLabels {
    /// Laser channel score label
    pub laser: &'static str,
    /// Infrared channel score label
    pub infrared: &'static str,
    /// Fused score label
    pub fused: &'static str,
    /// Detection confidence label
    pub confidence: &'static str,
}

const CLASSIC_PROFILE: ScoringProfile = ScoringProfile {
    laser_base: 85.0,
    laser_span: 10.0,
    laser_cap: 95.0,
    infrared_base: 80.0,
    infrared_span: 12.0,
    infrared_cap: 92.0,
    infrared_reference_ppm: 5.0,
    fusion_bonus: 3.0,
    fused_cap: 98.0,
    confidence_span: 2.0,
    confidence_cap: 99.0,
    signal_spread: 10.0,
};

const UNIFIED_PROFILE: ScoringProfile = ScoringProfile {
    laser_base: 88.0,
    laser_span: 9.0,
    laser_cap: 97.0,
    infrared_base: 84.0,
    infrared_span: 12.0,
    infrared_cap: 96.0,
    infrared_reference_ppm: 5.0,
    fusion_bonus: 5.0,
    fused_cap: 98.0,
    confidence_span: 2.0,
    confidence_cap: 100.0,
    signal_spread: 10.0,
};

impl ScoringVariant {
    /// Every known variant
    pub const ALL: [ScoringVariant; 2] =
        [ScoringVariant::ClassicDualChannel, ScoringVariant::UnifiedAiFusion];

    /// Scoring parameters for this variant
    pub const fn profile(self) -> ScoringProfile {
        match self {
            ScoringVariant::ClassicDualChannel => CLASSIC_PROFILE,
            ScoringVariant::UnifiedAiFusion => UNIFIED_PROFILE,
        }
    }

    /// Labels views print for this variant
    pub const fn labels(self) -> MetricLabels {
        match self {
            ScoringVariant::ClassicDualChannel => MetricLabels {
                laser: "Laser accuracy",
                infrared: "Infrared accuracy",
                fused: "Fused accuracy",
                confidence: "Detection confidence",
            },
            ScoringVariant::UnifiedAiFusion => MetricLabels {
                laser: "Laser signal",
                infrared: "Infrared signal",
                fused: "Unified accuracy",
                confidence: "AI confidence",
            },
        }
    }
}
