//! Store Statistics Module
//!
//! Tracks dataset lifecycle metrics: reloads, TTL expirations and size.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Store Stats ==
/// Tracks store lifecycle metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Current number of courses in the store
    pub total_courses: usize,
    /// Number of courses removed by the TTL sweep
    pub expired: u64,
    /// Number of full dataset replacements
    pub reloads: u64,
    /// When the dataset was last replaced
    pub last_reload_at: Option<DateTime<Utc>>,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Expired ==
    /// Adds `count` to the expired counter.
    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    // == Record Reload ==
    /// Increments the reload counter and remembers when it happened.
    pub fn record_reload(&mut self, at: DateTime<Utc>) {
        self.reloads += 1;
        self.last_reload_at = Some(at);
    }

    // == Update Course Count ==
    /// Updates the total courses count.
    pub fn set_total_courses(&mut self, count: usize) {
        self.total_courses = count;
    }
}
