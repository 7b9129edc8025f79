//! Feed configuration

use dualray_core::constants::{DEFAULT_TICK_INTERVAL_MS, MAX_STORED_READINGS};
use dualray_core::{DashboardSettings, ScoringVariant};
use serde::{Deserialize, Serialize};

use crate::errors::{FeedError, FeedResult};

/// How the live feed runs
///
/// JSON documents may omit any field:
///
/// ```rust
/// use dualray_feed::FeedConfig;
///
/// let config = FeedConfig::from_json(r#"{ "seed": 7, "variant": "unified_ai_fusion" }"#)?;
/// assert_eq!(config.tick_interval_ms, 3000);
/// assert_eq!(config.seed, Some(7));
/// # Ok::<(), dualray_feed::FeedError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Milliseconds between synthesis ticks
    pub tick_interval_ms: u64,
    /// Fixed generator seed; entropy when unset
    pub seed: Option<u64>,
    /// Scoring variant for synthesized metrics
    pub variant: ScoringVariant,
    /// Readings retained across the fleet, at most 1000
    pub capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            variant: ScoringVariant::default(),
            capacity: MAX_STORED_READINGS,
        }
    }
}

impl FeedConfig {
    /// Decode and validate a config document
    pub fn from_json(json: &str) -> FeedResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config whose tick interval follows the operator's sampling interval
    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self {
            tick_interval_ms: u64::from(settings.sampling_interval_sec) * 1000,
            ..Self::default()
        }
    }

    /// Reject zero intervals and capacities outside 1..=1000
    pub fn validate(&self) -> FeedResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(FeedError::Config("tick_interval_ms must be positive".into()));
        }
        if self.capacity == 0 {
            return Err(FeedError::Config("capacity must be positive".into()));
        }
        if self.capacity > MAX_STORED_READINGS {
            return Err(FeedError::Config(format!(
                "capacity must be at most {}",
                MAX_STORED_READINGS
            )));
        }
        Ok(())
    }

    /// Set the generator seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tick interval
    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the scoring variant
    pub fn variant(mut self, variant: ScoringVariant) -> Self {
        self.variant = variant;
        self
    }
}
