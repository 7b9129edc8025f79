//! Bounded Reading History for the Whole Fleet
//!
//! ## Overview
//!
//! Every reading from every boat lives in one arrival-ordered buffer with a
//! global capacity. When a push takes the buffer over capacity the oldest
//! readings are evicted first, regardless of which boat they belong to.
//!
//! ```text
//! push(B3#4) with capacity 6:
//!
//! ┌──────┬──────┬──────┬──────┬──────┬──────┐
//! │ B1#1 │ B2#1 │ B3#1 │ B1#2 │ B2#2 │ B3#2 │  ← full
//! └──────┴──────┴──────┴──────┴──────┴──────┘
//!    ↓ evicted
//! ┌──────┬──────┬──────┬──────┬──────┬──────┐
//! │ B2#1 │ B3#1 │ B1#2 │ B2#2 │ B3#2 │ B3#4 │
//! └──────┴──────┴──────┴──────┴──────┴──────┘
//! ```
//!
//! ## Per-Boat Views
//!
//! A boat's history is the subsequence of the buffer with its id, in
//! arrival order. "Latest reading" means last appended, not greatest
//! timestamp. With at most 1,000 entries a reverse scan is cheaper than
//! keeping a per-boat index in sync with eviction.
//!
//! ## Thread Safety
//!
//! The store is a plain owned value. Concurrent consumers share it through
//! the hub behind a lock.

use std::collections::VecDeque;

use log::debug;

use crate::constants::buffers::MAX_STORED_READINGS;
use crate::reading::Reading;
use crate::time::Timestamp;

/// Arrival-ordered, capacity-bounded reading history
#[derive(Debug, Clone)]
pub struct ReadingStore {
    readings: VecDeque<Reading>,
    capacity: usize,
    last_updated: Option<Timestamp>,
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingStore {
    /// Empty store holding up to 1,000 readings
    pub fn new() -> Self {
        Self::with_capacity(MAX_STORED_READINGS)
    }

    /// Empty store with a custom cap, clamped to 1..=1000
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_STORED_READINGS);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
            last_updated: None,
        }
    }

    /// Append a reading, evicting the oldest entries past capacity
    ///
    /// Returns how many readings were evicted.
    pub fn push(&mut self, reading: Reading) -> usize {
        self.readings.push_back(reading);
        let mut evicted = 0;
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            debug!("evicted {} oldest readings (cap {})", evicted, self.capacity);
        }
        evicted
    }

    /// Append many readings in order
    pub fn extend<I: IntoIterator<Item = Reading>>(&mut self, readings: I) -> usize {
        readings.into_iter().map(|r| self.push(r)).sum()
    }

    /// Most recently appended reading for a boat
    pub fn latest(&self, boat_id: &str) -> Option<&Reading> {
        self.readings.iter().rev().find(|r| r.boat_id() == boat_id)
    }

    /// All readings for a boat, oldest first
    pub fn history(&self, boat_id: &str) -> Vec<&Reading> {
        self.readings
            .iter()
            .filter(|r| r.boat_id() == boat_id)
            .collect()
    }

    /// The last `n` readings for a boat, oldest first
    pub fn recent(&self, boat_id: &str, n: usize) -> Vec<&Reading> {
        let mut window: Vec<&Reading> = self
            .readings
            .iter()
            .rev()
            .filter(|r| r.boat_id() == boat_id)
            .take(n)
            .collect();
        window.reverse();
        window
    }

    /// Distinct boat ids in order of first appearance
    pub fn known_boats(&self) -> Vec<String> {
        let mut boats: Vec<String> = Vec::new();
        for reading in &self.readings {
            if !boats.iter().any(|b| b == reading.boat_id()) {
                boats.push(reading.boat_id().to_string());
            }
        }
        boats
    }

    /// Latest reading of every known boat, in first-appearance order
    pub fn latest_per_boat(&self) -> Vec<&Reading> {
        self.known_boats()
            .iter()
            .filter_map(|boat| self.latest(boat))
            .collect()
    }

    /// Every stored reading, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Reading> + ExactSizeIterator {
        self.readings.iter()
    }

    /// Total readings across all boats
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Maximum readings retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record that the store was refreshed at `at`
    pub fn touch(&mut self, at: Timestamp) {
        self.last_updated = Some(at);
    }

    /// When the store was last refreshed, if ever
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }

    /// Drop every reading and the refresh marker
    pub fn clear(&mut self) {
        self.readings.clear();
        self.last_updated = None;
    }
}
