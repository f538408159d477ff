//! Persistent Store Handle
//!
//! Owns a shared [`KeyValueStoreBase`] together with the timer that flushes it.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::persistence::{FileStore, Persistence};
use crate::store::{FlushStats, Iterate, KeyValueStoreBase};
use crate::tasks::{spawn_flush_task, FlushTimer};

// == Persistent Key Value Store ==
/// A store plus its flush timer.
///
/// All access goes through one lock, so mutations, reads and timer flushes
/// never overlap. The timer task only holds a weak reference back to the
/// state; dropping this handle cancels it.
#[derive(Debug)]
pub struct PersistentKeyValueStore<P: Persistence> {
    state: Arc<RwLock<KeyValueStoreBase<P>>>,
    flush_timer: Option<FlushTimer>,
}

impl<P: Persistence> PersistentKeyValueStore<P> {
    // == Open ==
    /// Loads `persistence` into a new store and starts its flush timer.
    pub fn open(persistence: P, flush_interval: Duration, verify_iteration: bool) -> Result<Self> {
        let base = KeyValueStoreBase::open(persistence, flush_interval)?
            .with_verify_iteration(verify_iteration);
        Self::from_base(base)
    }

    /// Wraps an existing base, starting a flush timer if its interval is
    /// non-zero. A timer needs a Tokio runtime to run on.
    pub fn from_base(base: KeyValueStoreBase<P>) -> Result<Self> {
        let interval = base.flush_interval();
        let state = Arc::new(RwLock::new(base));

        let flush_timer = if !interval.is_zero() {
            Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
            Some(spawn_flush_task(Arc::downgrade(&state), interval))
        } else {
            None
        };

        Ok(Self { state, flush_timer })
    }

    // == Add Or Update ==
    pub async fn add_or_update(&self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.state.write().await.add_or_update(key, value);
    }

    // == Remove ==
    pub async fn remove(&self, key: &[u8]) {
        self.state.write().await.remove(key);
    }

    // == Get ==
    pub async fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.state.read().await.get(key).map(<[u8]>::to_vec)
    }

    // == Iterate ==
    /// Walks entries under a read lock; see [`KeyValueStoreBase::iterate`].
    pub async fn iterate<F>(&self, callback: F)
    where
        F: FnMut(&[u8], &[u8]) -> Iterate,
    {
        self.state.read().await.iterate(callback);
    }

    // == Flush ==
    /// Writes the store out now, regardless of the timer.
    pub async fn flush(&self) -> Result<usize> {
        Ok(self.state.write().await.flush()?)
    }

    // == Stats ==
    pub async fn stats(&self) -> FlushStats {
        self.state.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }

    pub async fn flush_interval(&self) -> Duration {
        self.state.read().await.flush_interval()
    }

    /// Returns true if a background flush task was started.
    pub fn has_flush_timer(&self) -> bool {
        self.flush_timer.is_some()
    }
}

impl PersistentKeyValueStore<FileStore> {
    /// Opens the file-backed store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Self::open(
            FileStore::new(&config.data_file),
            config.flush_interval(),
            config.verify_iteration,
        )?;
        info!(
            "Opened key value store {} with flush interval {:?}",
            config.data_file.display(),
            config.flush_interval()
        );
        Ok(store)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_zero_interval_has_no_timer() {
        let backend = MemoryStore::new();
        let store = assert_ok!(PersistentKeyValueStore::open(backend.clone(), Duration::ZERO, true));
        assert!(!store.has_flush_timer());

        store.add_or_update("a", "1").await;
        store.remove(b"a").await;
        assert_eq!(backend.persist_count(), 2);
    }

    #[tokio::test]
    async fn test_get_returns_owned_copy() {
        let store =
            PersistentKeyValueStore::open(MemoryStore::new(), Duration::ZERO, true).unwrap();
        store.add_or_update(b"k".to_vec(), vec![0u8, 159, 146, 150]).await;

        assert_eq!(store.get(b"k").await, Some(vec![0u8, 159, 146, 150]));
        assert_eq!(store.get(b"missing").await, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_flushes_debounced_writes() {
        let backend = MemoryStore::new();
        let interval = Duration::from_secs(1);
        let store = PersistentKeyValueStore::open(backend.clone(), interval, true).unwrap();
        assert!(store.has_flush_timer());

        store.add_or_update("a", "1").await;
        store.add_or_update("b", "2").await;
        store.add_or_update("a", "3").await;
        assert_eq!(backend.persist_count(), 0);

        tokio::time::sleep(interval + Duration::from_millis(1)).await;
        assert_eq!(backend.persist_count(), 1);

        let reopened = KeyValueStoreBase::open(backend.clone(), Duration::ZERO).unwrap();
        assert_eq!(reopened.get(b"a"), Some(&b"3"[..]));
        assert_eq!(reopened.get(b"b"), Some(&b"2"[..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let backend = MemoryStore::new();
        let interval = Duration::from_millis(50);
        let store = PersistentKeyValueStore::open(backend.clone(), interval, true).unwrap();

        drop(store);
        tokio::time::sleep(interval * 4).await;
        assert_eq!(backend.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_explicit_flush() {
        let backend = MemoryStore::new();
        let store =
            PersistentKeyValueStore::open(backend.clone(), Duration::from_secs(60), true).unwrap();
        store.add_or_update("k", "v").await;

        let bytes = store.flush().await.unwrap();
        assert_eq!(bytes, b"1\nk1\nv".len());
        assert_eq!(backend.persist_count(), 1);
        assert_eq!(store.stats().await.flushes, 1);
    }

    #[tokio::test]
    async fn test_iterate_break() {
        let store =
            PersistentKeyValueStore::open(MemoryStore::new(), Duration::from_secs(60), true)
                .unwrap();
        for i in 0..5 {
            store.add_or_update(format!("k{}", i), "v").await;
        }

        let mut visits = 0;
        store
            .iterate(|_, _| {
                visits += 1;
                Iterate::Break
            })
            .await;
        assert_eq!(visits, 1);
    }

    #[test]
    fn test_timer_requires_runtime() {
        let result =
            PersistentKeyValueStore::open(MemoryStore::new(), Duration::from_secs(1), false);
        assert!(matches!(result, Err(StoreError::NoRuntime)));
    }

    #[test]
    fn test_zero_interval_needs_no_runtime() {
        let result = PersistentKeyValueStore::open(MemoryStore::new(), Duration::ZERO, false);
        assert!(result.is_ok());
    }
}
