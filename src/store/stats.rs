//! Flush Statistics Module
//!
//! Tracks how often the store was mutated and written out.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Flush Stats ==
/// Counters describing store activity since it was opened.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlushStats {
    /// Number of add/update and remove calls
    pub mutations: u64,
    /// Number of successful writes to the backing store
    pub flushes: u64,
    /// Number of writes the backing store rejected
    pub failed_flushes: u64,
    /// Size of the most recently written buffer
    pub last_flush_bytes: usize,
    /// When the most recent successful write finished
    pub last_flush_at: Option<DateTime<Utc>>,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl FlushStats {
    // == Constructor ==
    /// Creates a new FlushStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Mutation ==
    pub fn record_mutation(&mut self) {
        self.mutations += 1;
    }

    // == Record Flush ==
    /// Records a successful write of `bytes` bytes.
    pub fn record_flush(&mut self, bytes: usize) {
        self.flushes += 1;
        self.last_flush_bytes = bytes;
        self.last_flush_at = Some(Utc::now());
    }

    // == Record Failed Flush ==
    pub fn record_failed_flush(&mut self) {
        self.failed_flushes += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
