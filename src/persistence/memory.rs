//! In-memory persistence.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use super::Persistence;

#[derive(Debug, Default)]
struct MemoryState {
    contents: Option<Vec<u8>>,
    persist_count: usize,
    fail_persists: bool,
}

// == Memory Store ==
/// Keeps the last persisted buffer in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a store and
/// keep another to watch what gets written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose first `load` returns `contents`.
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().contents = Some(contents.into());
        store
    }

    /// Last buffer handed to `persist` (or the seeded contents).
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.lock().contents.clone()
    }

    /// Number of successful `persist` calls.
    pub fn persist_count(&self) -> usize {
        self.lock().persist_count
    }

    /// Makes subsequent `persist` calls fail with an I/O error.
    pub fn set_fail_persists(&self, fail: bool) {
        self.lock().fail_persists = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding this lock cannot leave the state half-updated
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Persistence for MemoryStore {
    fn load(&mut self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.lock().contents.clone())
    }

    fn persist(&mut self, contents: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        if state.fail_persists {
            return Err(io::Error::new(io::ErrorKind::Other, "persist disabled"));
        }
        state.contents = Some(contents.to_vec());
        state.persist_count += 1;
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_load() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_seeded_load() {
        let mut store = MemoryStore::with_contents(b"0\n0\n".to_vec());
        assert_eq!(store.load().unwrap().unwrap(), b"0\n0\n");
        assert_eq!(store.persist_count(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let observer = MemoryStore::new();
        let mut writer = observer.clone();

        writer.persist(b"abc").unwrap();
        assert_eq!(observer.contents().unwrap(), b"abc");
        assert_eq!(observer.persist_count(), 1);
    }

    #[test]
    fn test_failing_persist() {
        let mut store = MemoryStore::new();
        store.set_fail_persists(true);

        assert!(store.persist(b"abc").is_err());
        assert_eq!(store.persist_count(), 0);
        assert!(store.contents().is_none());
    }
}
