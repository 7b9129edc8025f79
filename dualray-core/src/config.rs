//! Dashboard settings
//!
//! The operator-facing configuration record. Only the alert thresholds feed
//! back into the engine (through [`DashboardSettings::alert_thresholds`]);
//! the rest is carried so a settings document round-trips intact.
//!
//! Settings documents are JSON with camelCase keys. Missing keys take their
//! defaults, so an empty object `{}` is a valid document.
//!
//! ```rust
//! use dualray_core::DashboardSettings;
//!
//! let settings = DashboardSettings::from_json(r#"{ "lowBatteryThreshold": 30 }"#)?;
//! assert_eq!(settings.low_battery_threshold, 30);
//! assert_eq!(settings.high_concentration_threshold, 4.0);
//! # Ok::<(), dualray_core::TelemetryError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::fleet::{
    DEFAULT_HIGH_CONCENTRATION_PPM, DEFAULT_LARGE_PARTICLE_MICRONS, DEFAULT_LOW_BATTERY_PCT,
};
use crate::errors::{TelemetryError, TelemetryResult};
use crate::queries::alerts::AlertThresholds;

/// Operator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    /// Concentration (ppm) above which a boat raises a warning alert
    pub high_concentration_threshold: f64,
    /// Battery percentage below which a boat raises a battery alert
    pub low_battery_threshold: u8,
    /// Particle size (µm) above which a boat raises an info alert
    pub large_particle_threshold: f64,
    /// Seconds between live updates
    pub sampling_interval_sec: u32,
    /// Days of history an export job should keep
    pub retention_days: u32,
    /// Export automatically on a schedule
    pub auto_export: bool,
    /// Laser detector sensitivity (percent)
    pub laser_sensitivity: f64,
    /// Infrared baseline offset (ppm)
    pub infrared_baseline: f64,
    /// Weight given to the laser channel when fusing (0-1)
    pub fusion_weight: f64,
    /// Show notifications
    pub notifications: bool,
    /// Dark colour scheme
    pub dark_mode: bool,
    /// Refresh views automatically
    pub auto_refresh: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            high_concentration_threshold: DEFAULT_HIGH_CONCENTRATION_PPM,
            low_battery_threshold: DEFAULT_LOW_BATTERY_PCT,
            large_particle_threshold: DEFAULT_LARGE_PARTICLE_MICRONS,
            sampling_interval_sec: 3,
            retention_days: 30,
            auto_export: true,
            laser_sensitivity: 92.0,
            infrared_baseline: 0.5,
            fusion_weight: 0.6,
            notifications: true,
            dark_mode: false,
            auto_refresh: true,
        }
    }
}

impl DashboardSettings {
    /// Decode and validate a settings document
    pub fn from_json(json: &str) -> TelemetryResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Encode as a pretty-printed settings document
    pub fn to_json(&self) -> TelemetryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value against its documented range
    pub fn validate(&self) -> TelemetryResult<()> {
        non_negative("highConcentrationThreshold", self.high_concentration_threshold)?;
        non_negative("largeParticleThreshold", self.large_particle_threshold)?;
        non_negative("infraredBaseline", self.infrared_baseline)?;

        if self.low_battery_threshold > 100 {
            return Err(invalid("lowBatteryThreshold", "must be a percentage"));
        }
        if self.sampling_interval_sec == 0 {
            return Err(invalid("samplingIntervalSec", "must be at least 1"));
        }
        if self.retention_days == 0 {
            return Err(invalid("retentionDays", "must be at least 1"));
        }
        if !(0.0..=100.0).contains(&self.laser_sensitivity) {
            return Err(invalid("laserSensitivity", "must be between 0 and 100"));
        }
        if !(0.0..=1.0).contains(&self.fusion_weight) {
            return Err(invalid("fusionWeight", "must be between 0 and 1"));
        }
        Ok(())
    }

    /// Restore every value to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Thresholds the alert query evaluates against
    pub fn alert_thresholds(&self) -> AlertThresholds {
        AlertThresholds {
            high_concentration_ppm: self.high_concentration_threshold,
            low_battery_pct: self.low_battery_threshold,
            large_particle_microns: self.large_particle_threshold,
        }
    }
}

fn invalid(name: &'static str, reason: &'static str) -> TelemetryError {
    TelemetryError::InvalidSetting { name, reason }
}

fn non_negative(name: &'static str, value: f64) -> TelemetryResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be a non-negative number"))
    }
}
