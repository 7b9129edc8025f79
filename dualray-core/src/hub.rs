//! Telemetry Hub: the Owned Fleet State
//!
//! ## Overview
//!
//! [`TelemetryHub`] owns everything the dashboard reads from: the bounded
//! reading store, the metric synthesizer with its random generator, the
//! clock and the scoring variant. It is built once at startup and handed
//! to consumers by reference (or behind a lock by the live feed).
//!
//! ## Mutation Paths
//!
//! Exactly two methods change the store:
//!
//! ```text
//! load_snapshot(csv) ──► parse ──► synthesize ──► push ──┐
//!                                                        ├──► touch(now)
//! tick() ──► for each known boat: perturb(latest) ──► push
//! ```
//!
//! Both refresh the last-updated marker. `tick` refreshes it even when no
//! boat is known yet, so the health panel shows the feed is alive.
//!
//! ## Queries
//!
//! Every other method is a read-only delegation into [`crate::queries`] or
//! [`crate::status`], evaluated against the hub's clock. None of them fail.
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use dualray_core::time::FixedClock;
//! use dualray_core::{BoatStatus, TelemetryHub};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 15, 10, 0, 0).unwrap());
//! let mut hub = TelemetryHub::seeded(1).with_clock(clock.clone());
//! assert_eq!(hub.boat_status("B1"), BoatStatus::Offline);
//!
//! hub.load_snapshot("header\n2024-09-15T10:00:00Z,B1,19.07,72.87,12.5,1.8,40,250,76,solar");
//! assert_eq!(hub.readings().len(), 1);
//!
//! clock.advance(Duration::minutes(10));
//! assert_eq!(hub.boat_status("B1"), BoatStatus::Offline);
//! hub.tick();
//! assert_ne!(hub.boat_status("B1"), BoatStatus::Offline);
//! ```

use core::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{TechnicalSpecification, TECHNICAL_SPECIFICATION};
use crate::config::DashboardSettings;
use crate::csv::{self, LoadStats};
use crate::queries::{
    accuracy, alerts, analytics, fleet, health, technical, validation, AccuracySummary, Alert,
    FleetSnapshot, HourlyBucket, MapPosition, Statistics, SystemHealth, TechnicalDetail,
    TimeRange, Trend, ValidationReport,
};
use crate::reading::Reading;
use crate::status::{boat_status, BoatStatus};
use crate::store::ReadingStore;
use crate::synth::{MetricLabels, MetricSynthesizer, ScoringVariant};
use crate::time::{SystemClock, TimeSource, Timestamp};

/// Owned fleet state with its two mutation paths and all queries
pub struct TelemetryHub<R: Rng = StdRng> {
    store: ReadingStore,
    synth: MetricSynthesizer<R>,
    clock: Box<dyn TimeSource>,
}

impl TelemetryHub<StdRng> {
    /// Hub on the wall clock with an entropy-seeded generator
    pub fn new() -> Self {
        Self::from_parts(
            MetricSynthesizer::new(ScoringVariant::default()),
            Box::new(SystemClock),
            ReadingStore::new(),
        )
    }

    /// Hub on the wall clock with a deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::from_parts(
            MetricSynthesizer::seeded(ScoringVariant::default(), seed),
            Box::new(SystemClock),
            ReadingStore::new(),
        )
    }
}

impl Default for TelemetryHub<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TelemetryHub<R> {
    /// Assemble a hub from its parts
    pub fn from_parts(
        synth: MetricSynthesizer<R>,
        clock: Box<dyn TimeSource>,
        store: ReadingStore,
    ) -> Self {
        Self { store, synth, clock }
    }

    /// Replace the clock
    pub fn with_clock<C: TimeSource + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Switch scoring variant
    ///
    /// Affects readings synthesized from now on and the labels and text
    /// the views use.
    pub fn with_variant(mut self, variant: ScoringVariant) -> Self {
        self.synth = self.synth.with_variant(variant);
        self
    }

    /// Replace the store with an empty one of the given capacity (at most 1000)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.store = ReadingStore::with_capacity(capacity);
        self
    }

    // ===== MUTATION =====

    /// Load a snapshot document
    ///
    /// Every parseable row is synthesized and appended. Unusable rows are
    /// counted and logged; the load itself never fails.
    pub fn load_snapshot(&mut self, text: &str) -> LoadStats {
        let (samples, stats) = csv::parse_snapshot(text);
        for sample in samples {
            let reading = self.synth.synthesize(sample);
            self.store.push(reading);
        }
        self.store.touch(self.clock.now());

        info!(
            "loaded snapshot: {} rows, {} skipped, {} lossy, {} boats",
            stats.rows_read,
            stats.skipped_rows,
            stats.lossy_rows,
            self.store.known_boats().len()
        );
        stats
    }

    /// Run one synthesis step
    ///
    /// Every known boat gets one new reading perturbed from its latest,
    /// timestamped with the clock's now. Returns the number appended.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut fresh = Vec::new();
        for boat in self.store.known_boats() {
            if let Some(previous) = self.store.latest(&boat) {
                fresh.push(self.synth.perturb(previous, now));
            }
        }

        let produced = fresh.len();
        let evicted = self.store.extend(fresh);
        self.store.touch(now);

        debug!(
            "tick at {}: {} readings, {} evicted, {} stored",
            now,
            produced,
            evicted,
            self.store.len()
        );
        produced
    }

    /// Append an already-built reading
    pub fn insert(&mut self, reading: Reading) {
        self.store.push(reading);
    }

    /// Drop all readings
    pub fn clear(&mut self) {
        self.store.clear();
    }

    // ===== READINGS =====

    /// The underlying store
    pub fn store(&self) -> &ReadingStore {
        &self.store
    }

    /// Every stored reading, oldest first
    pub fn readings(&self) -> Vec<&Reading> {
        self.store.iter().collect()
    }

    /// Known boat ids in first-appearance order
    pub fn boats(&self) -> Vec<String> {
        self.store.known_boats()
    }

    /// Latest reading for a boat
    pub fn latest_reading(&self, boat_id: &str) -> Option<&Reading> {
        accuracy::latest_reading(&self.store, boat_id)
    }

    /// History for a boat, oldest first
    pub fn history(&self, boat_id: &str) -> Vec<&Reading> {
        self.store.history(boat_id)
    }

    // ===== BOAT QUERIES =====

    /// Latest channel and fused scores, zeroed without a reading
    pub fn sensor_accuracy(&self, boat_id: &str) -> AccuracySummary {
        accuracy::sensor_accuracy(&self.store, boat_id)
    }

    /// Current status of a boat
    pub fn boat_status(&self, boat_id: &str) -> BoatStatus {
        boat_status(self.store.latest(boat_id), self.clock.now())
    }

    /// Rolling-window validation, absent with fewer than 5 readings
    pub fn validate_accuracy(&self, boat_id: &str) -> Option<ValidationReport> {
        validation::validate_accuracy(&self.store, boat_id)
    }

    /// Technical composite for a boat's latest reading
    pub fn technical_detail(&self, boat_id: &str) -> Option<TechnicalDetail> {
        technical::technical_detail(&self.store, boat_id, self.synth.variant())
    }

    /// Concentration direction over the last six readings
    pub fn concentration_trend(&self, boat_id: &str) -> Option<Trend> {
        fleet::concentration_trend(&self.store, boat_id)
    }

    // ===== FLEET QUERIES =====

    /// Overview figures over each boat's latest reading
    pub fn fleet_snapshot(&self) -> FleetSnapshot {
        fleet::fleet_snapshot(&self.store)
    }

    /// Map markers for every boat
    pub fn map_positions(&self) -> Vec<MapPosition> {
        fleet::map_positions(&self.store, self.clock.now())
    }

    /// Alerts raised by each boat's latest reading
    pub fn alerts(&self, settings: &DashboardSettings) -> Vec<Alert> {
        alerts::evaluate(&self.store, &settings.alert_thresholds(), self.clock.now())
    }

    /// Data-integrity indicator
    pub fn health(&self) -> SystemHealth {
        health::system_health(&self.store, self.clock.now())
    }

    // ===== ANALYTICS =====

    /// Readings within a trailing range
    pub fn readings_within(&self, range: TimeRange) -> Vec<&Reading> {
        analytics::readings_within(&self.store, range, self.clock.now())
    }

    /// Concentration statistics over the whole history
    pub fn concentration_statistics(&self) -> Option<Statistics> {
        analytics::concentration_statistics(self.store.iter())
    }

    /// Hour-of-day profile of readings within a range
    pub fn hourly_profile(&self, range: TimeRange) -> Vec<HourlyBucket> {
        analytics::hourly_profile(self.readings_within(range))
    }

    // ===== EXPORT & METADATA =====

    /// The whole history as a snapshot document
    pub fn export_csv(&self) -> String {
        csv::export_csv(self.store.iter())
    }

    /// Download name for an export taken now
    pub fn export_file_name(&self) -> String {
        csv::export_file_name(self.clock.now().date_naive())
    }

    /// When the store last changed through a mutation path
    pub fn last_update(&self) -> Option<Timestamp> {
        self.store.last_updated()
    }

    /// Current time on the hub's clock
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Static sensor specification
    pub fn technical_specification(&self) -> &'static TechnicalSpecification {
        &TECHNICAL_SPECIFICATION
    }

    /// Active scoring variant
    pub fn variant(&self) -> ScoringVariant {
        self.synth.variant()
    }

    /// Labels for the active variant
    pub fn labels(&self) -> MetricLabels {
        self.synth.variant().labels()
    }
}

impl<R: Rng> fmt::Debug for TelemetryHub<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryHub")
            .field("readings", &self.store.len())
            .field("boats", &self.store.known_boats())
            .field("variant", &self.synth.variant())
            .field("wall_clock", &self.clock.is_wall_clock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    const SNAPSHOT: &str = "timestamp,boat_id,gps_lat,gps_long,particle_size_microns,concentration_ppm,depth_cm,collection_volume_ml,battery_status,power_source
2024-09-15T10:00:00Z,B1,19.0760,72.8777,12.5,1.8,40,250,76,solar
2024-09-15T10:00:00Z,B2,19.0800,72.8800,8.0,4.6,35,240,12,hydro
2024-09-15T10:00:03Z,B1,19.0761,72.8778,13.0,1.9,40,250,75,solar";

    fn hub() -> (TelemetryHub, FixedClock) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 9, 15, 10, 1, 0).unwrap());
        (TelemetryHub::seeded(11).with_clock(clock.clone()), clock)
    }

    #[test]
    fn load_then_tick_appends_one_per_boat() {
        let (mut hub, clock) = hub();
        let stats = hub.load_snapshot(SNAPSHOT);
        assert_eq!(stats.rows_read, 3);
        assert_eq!(hub.boats(), vec!["B1", "B2"]);

        clock.advance(Duration::seconds(3));
        assert_eq!(hub.tick(), 2);
        assert_eq!(hub.history("B1").len(), 3);
        assert_eq!(hub.latest_reading("B2").unwrap().timestamp(), clock.now());
        assert_eq!(hub.last_update(), Some(clock.now()));
    }

    #[test]
    fn tick_on_empty_store_still_touches() {
        let (mut hub, clock) = hub();
        assert_eq!(hub.tick(), 0);
        assert_eq!(hub.last_update(), Some(clock.now()));
    }

    #[test]
    fn capacity_bounds_the_store() {
        let (hub, _) = hub();
        let mut hub = hub.with_capacity(4);
        hub.load_snapshot(SNAPSHOT);
        for _ in 0..5 {
            hub.tick();
        }
        assert_eq!(hub.readings().len(), 4);
    }

    #[test]
    fn alerts_follow_settings() {
        let (mut hub, _) = hub();
        hub.load_snapshot(SNAPSHOT);
        let alerts = hub.alerts(&DashboardSettings::default());
        // B2 is above 4 ppm and below 15% battery
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.boat_id == "B2"));
    }

    #[test]
    fn export_name_uses_hub_clock() {
        let (hub, _) = hub();
        assert_eq!(hub.export_file_name(), "sensor-data-2024-09-15.csv");
    }

    #[test]
    fn variant_switch_changes_labels_and_text() {
        let (hub, _) = hub();
        let mut hub = hub.with_variant(ScoringVariant::UnifiedAiFusion);
        hub.load_snapshot(SNAPSHOT);
        assert_eq!(hub.labels().fused, "Unified accuracy");
        let detail = hub.technical_detail("B1").unwrap();
        assert_eq!(detail.laser.wavelength_nm, 650);
        assert!(detail.fusion.accuracy >= detail.laser.accuracy);
    }
}
