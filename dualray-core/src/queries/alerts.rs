//! Threshold alerts
//!
//! Each evaluation checks the latest reading of every known boat against
//! the operator's thresholds:
//!
//! | Check | Condition | Severity |
//! |-------|-----------|----------|
//! | concentration | above high threshold | warning |
//! | battery | below low threshold | error under 15%, else warning |
//! | particle | above large-particle threshold | info |
//!
//! [`AlertLog`] accumulates evaluations across ticks and keeps only the
//! ten most recent alerts.

use std::collections::VecDeque;

use serde::Serialize;

use crate::constants::buffers::ALERT_LOG_CAPACITY;
use crate::constants::fleet::{
    CRITICAL_BATTERY_PCT, DEFAULT_HIGH_CONCENTRATION_PPM, DEFAULT_LARGE_PARTICLE_MICRONS,
    DEFAULT_LOW_BATTERY_PCT,
};
use crate::reading::Reading;
use crate::store::ReadingStore;
use crate::time::Timestamp;

/// Limits alerts are raised against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlertThresholds {
    /// Concentration (ppm) above which a warning is raised
    pub high_concentration_ppm: f64,
    /// Battery (percent) below which a battery alert is raised
    pub low_battery_pct: u8,
    /// Particle size (µm) above which a notice is raised
    pub large_particle_microns: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_concentration_ppm: DEFAULT_HIGH_CONCENTRATION_PPM,
            low_battery_pct: DEFAULT_LOW_BATTERY_PCT,
            large_particle_microns: DEFAULT_LARGE_PARTICLE_MICRONS,
        }
    }
}

/// What an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// High microplastic concentration
    Concentration,
    /// Low battery
    Battery,
    /// Large particle detected
    Particle,
}

impl AlertKind {
    /// Tag used in alert ids
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Concentration => "concentration",
            AlertKind::Battery => "battery",
            AlertKind::Particle => "particle",
        }
    }
}

/// How urgent an alert is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational
    Info,
    /// Needs attention
    Warning,
    /// Needs action now
    Error,
}

/// One raised alert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// `"{boat}-{kind}-{millis}"`
    pub id: String,
    /// Boat that raised it
    pub boat_id: String,
    /// What it is about
    pub kind: AlertKind,
    /// How urgent it is
    pub severity: AlertSeverity,
    /// Operator-facing text
    pub message: String,
    /// When it was raised
    pub raised_at: Timestamp,
}

impl Alert {
    fn new(
        reading: &Reading,
        kind: AlertKind,
        severity: AlertSeverity,
        message: String,
        at: Timestamp,
    ) -> Self {
        Self {
            id: format!("{}-{}-{}", reading.boat_id(), kind.as_str(), at.timestamp_millis()),
            boat_id: reading.boat_id().to_string(),
            kind,
            severity,
            message,
            raised_at: at,
        }
    }
}

/// Alerts for one reading
pub fn evaluate_reading(reading: &Reading, thresholds: &AlertThresholds, at: Timestamp) -> Vec<Alert> {
    let s = &reading.sample;
    let mut alerts = Vec::new();

    if s.concentration_ppm > thresholds.high_concentration_ppm {
        alerts.push(Alert::new(
            reading,
            AlertKind::Concentration,
            AlertSeverity::Warning,
            format!("High microplastic concentration detected: {:.2} ppm", s.concentration_ppm),
            at,
        ));
    }

    if s.battery_status < thresholds.low_battery_pct {
        let severity = if s.battery_status < CRITICAL_BATTERY_PCT {
            AlertSeverity::Error
        } else {
            AlertSeverity::Warning
        };
        alerts.push(Alert::new(
            reading,
            AlertKind::Battery,
            severity,
            format!("Low battery warning: {}%", s.battery_status),
            at,
        ));
    }

    if s.particle_size_microns > thresholds.large_particle_microns {
        alerts.push(Alert::new(
            reading,
            AlertKind::Particle,
            AlertSeverity::Info,
            format!("Large particle detected: {:.1} μm", s.particle_size_microns),
            at,
        ));
    }

    alerts
}

/// Alerts for the latest reading of every known boat
pub fn evaluate(store: &ReadingStore, thresholds: &AlertThresholds, at: Timestamp) -> Vec<Alert> {
    store
        .latest_per_boat()
        .into_iter()
        .flat_map(|r| evaluate_reading(r, thresholds, at))
        .collect()
}

/// Most recent alerts, oldest first
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
}

impl AlertLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append alerts, dropping the oldest beyond ten
    pub fn record<I: IntoIterator<Item = Alert>>(&mut self, alerts: I) {
        for alert in alerts {
            self.alerts.push_back(alert);
            if self.alerts.len() > ALERT_LOG_CAPACITY {
                self.alerts.pop_front();
            }
        }
    }

    /// Remove the alert with `id`; false if it was not present
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    /// Alerts currently held, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    /// Alert count
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// True when nothing is held
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::PowerSource;
    use crate::reading::Sample;
    use crate::synth::{MetricSynthesizer, ScoringVariant};
    use chrono::{TimeZone, Utc};

    fn reading(boat: &str, ppm: f64, battery: u8, particle: f64) -> Reading {
        let sample = Sample {
            timestamp: Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 0).unwrap(),
            boat_id: boat.into(),
            gps_lat: 19.0,
            gps_long: 72.8,
            particle_size_microns: particle,
            concentration_ppm: ppm,
            depth_cm: 30,
            collection_volume_ml: 200,
            battery_status: battery,
            power_source: PowerSource::Solar,
        };
        MetricSynthesizer::seeded(ScoringVariant::ClassicDualChannel, 5).synthesize(sample)
    }

    fn at() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 5).unwrap()
    }

    #[test]
    fn quiet_reading_raises_nothing() {
        let alerts = evaluate_reading(&reading("B1", 1.0, 80, 10.0), &AlertThresholds::default(), at());
        assert!(alerts.is_empty());
    }

    #[test]
    fn every_check_can_fire() {
        let alerts = evaluate_reading(&reading("B2", 4.5, 10, 75.0), &AlertThresholds::default(), at());
        let kinds: Vec<(AlertKind, AlertSeverity)> =
            alerts.iter().map(|a| (a.kind, a.severity)).collect();
        assert_eq!(
            kinds,
            vec![
                (AlertKind::Concentration, AlertSeverity::Warning),
                (AlertKind::Battery, AlertSeverity::Error),
                (AlertKind::Particle, AlertSeverity::Info),
            ]
        );
        assert_eq!(alerts[1].message, "Low battery warning: 10%");
        assert_eq!(alerts[0].id, format!("B2-concentration-{}", at().timestamp_millis()));
    }

    #[test]
    fn battery_between_critical_and_low_is_warning() {
        let alerts = evaluate_reading(&reading("B1", 1.0, 20, 10.0), &AlertThresholds::default(), at());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn nan_concentration_never_alerts() {
        let alerts = evaluate_reading(&reading("B1", f64::NAN, 80, 10.0), &AlertThresholds::default(), at());
        assert!(alerts.is_empty());
    }

    #[test]
    fn log_keeps_last_ten() {
        let mut log = AlertLog::new();
        for i in 0..12 {
            let r = reading(&format!("B{i}"), 5.0, 80, 10.0);
            log.record(evaluate_reading(&r, &AlertThresholds::default(), at()));
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.iter().next().map(|a| a.boat_id.as_str()), Some("B2"));

        let id = format!("B5-concentration-{}", at().timestamp_millis());
        assert!(log.dismiss(&id));
        assert!(!log.dismiss(&id));
        assert_eq!(log.len(), 9);

        log.clear();
        assert!(log.is_empty());
    }
}
