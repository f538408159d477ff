//! Key Value Store Base Module
//!
//! In-memory byte map combined with the flush policy and the file codec.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use tracing::{debug, warn};

use crate::persistence::Persistence;
use crate::store::{codec, verify, FlushScheduler, FlushStats, Iterate};

// == Key Value Store Base ==
/// In-memory map of byte strings that writes itself to a [`Persistence`]
/// backend, either on every mutation or once per flush interval.
///
/// The base itself owns no timer. Whoever drives it must call
/// [`on_flush_timer`](Self::on_flush_timer) once per interval when the
/// interval is non-zero; see [`crate::tasks::spawn_flush_task`].
#[derive(Debug)]
pub struct KeyValueStoreBase<P: Persistence> {
    /// Key-value storage
    entries: HashMap<Vec<u8>, Vec<u8>>,
    /// Where flushed contents go
    persistence: P,
    /// Immediate vs. deferred flush policy
    scheduler: FlushScheduler,
    /// Activity counters
    stats: FlushStats,
    /// Snapshot the map around iterate() calls
    verify_iteration: bool,
}

impl<P: Persistence> KeyValueStoreBase<P> {
    // == Constructor ==
    /// Creates an empty store without reading from `persistence`.
    pub fn new(persistence: P, flush_interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            persistence,
            scheduler: FlushScheduler::new(flush_interval),
            stats: FlushStats::new(),
            verify_iteration: verify::VERIFY_BY_DEFAULT,
        }
    }

    // == Open ==
    /// Creates a store and populates it from whatever `persistence` holds.
    ///
    /// A malformed buffer is not an error: the valid prefix is kept and a
    /// warning is logged. Only I/O failures from the backend are returned.
    pub fn open(persistence: P, flush_interval: Duration) -> io::Result<Self> {
        let mut store = Self::new(persistence, flush_interval);
        store.load()?;
        Ok(store)
    }

    /// Enables or disables iteration verification for this store.
    ///
    /// The `verify-iteration` feature keeps it on regardless.
    pub fn with_verify_iteration(mut self, enabled: bool) -> Self {
        self.verify_iteration = enabled || verify::forced();
        self
    }

    // == Load ==
    /// Reads the backend and parses it into the map.
    ///
    /// Returns whether the stored buffer parsed cleanly.
    pub fn load(&mut self) -> io::Result<bool> {
        match self.persistence.load()? {
            Some(contents) => Ok(self.parse_contents(&contents)),
            None => Ok(true),
        }
    }

    // == Parse Contents ==
    /// Parses a serialized buffer into the map, keeping any prefix that
    /// parsed before an error.
    pub fn parse_contents(&mut self, contents: &[u8]) -> bool {
        let result = codec::parse_contents(contents, &mut self.entries);
        self.stats.set_total_entries(self.entries.len());
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("{} (kept {} entries)", err, self.entries.len());
                false
            }
        }
    }

    // == Add Or Update ==
    /// Inserts or overwrites the value stored under `key`.
    pub fn add_or_update(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
        self.after_mutation();
    }

    // == Remove ==
    /// Removes `key`. Removing a missing key is not an error.
    pub fn remove(&mut self, key: &[u8]) {
        self.entries.remove(key);
        self.after_mutation();
    }

    // == Get ==
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    // == Iterate ==
    /// Calls `callback` for each entry until it returns [`Iterate::Break`].
    ///
    /// Order is unspecified. The callback only gets shared access, so the
    /// store cannot be changed from inside it:
    ///
    /// ```compile_fail
    /// use std::time::Duration;
    /// use persistent_kv::persistence::MemoryStore;
    /// use persistent_kv::store::{Iterate, KeyValueStoreBase};
    ///
    /// let mut store = KeyValueStoreBase::new(MemoryStore::new(), Duration::ZERO);
    /// store.add_or_update("a", "1");
    /// store.iterate(|key, _| {
    ///     store.remove(key);
    ///     Iterate::Continue
    /// });
    /// ```
    ///
    /// With verification on, the map is also compared against a snapshot
    /// taken before the walk, and a difference panics.
    pub fn iterate<F>(&self, callback: F)
    where
        F: FnMut(&[u8], &[u8]) -> Iterate,
    {
        if self.verify_iteration {
            verify::assert_unmodified(|| self.entries.clone(), || self.walk(callback));
        } else {
            self.walk(callback);
        }
    }

    fn walk<F>(&self, mut callback: F)
    where
        F: FnMut(&[u8], &[u8]) -> Iterate,
    {
        for (key, value) in &self.entries {
            if callback(key, value) == Iterate::Break {
                return;
            }
        }
    }

    // == Flush ==
    /// Serializes the map and hands it to the backend.
    ///
    /// Failures are logged and counted before being returned.
    pub fn flush(&mut self) -> io::Result<usize> {
        let contents = codec::encode(
            self.entries
                .iter()
                .map(|(key, value)| (key.as_slice(), value.as_slice())),
        );

        match self.persistence.persist(&contents) {
            Ok(()) => {
                self.stats.record_flush(contents.len());
                debug!(
                    "Flushed {} entries ({} bytes)",
                    self.entries.len(),
                    contents.len()
                );
                Ok(contents.len())
            }
            Err(err) => {
                self.stats.record_failed_flush();
                warn!("Failed to persist key value store: {}", err);
                Err(err)
            }
        }
    }

    // == Flush Timer ==
    /// Timer callback: flushes, then returns the delay until the next tick.
    pub fn on_flush_timer(&mut self) -> Duration {
        // already logged and counted by flush()
        let _ = self.flush();
        self.scheduler.on_tick()
    }

    fn after_mutation(&mut self) {
        self.stats.record_mutation();
        self.stats.set_total_entries(self.entries.len());
        if self.scheduler.should_flush_on_mutation() {
            let _ = self.flush();
        }
    }

    // == Accessors ==
    pub fn flush_interval(&self) -> Duration {
        self.scheduler.interval()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.scheduler.is_armed()
    }

    pub fn verifies_iteration(&self) -> bool {
        self.verify_iteration
    }

    pub fn stats(&self) -> FlushStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
