//! Flush Timer Task
//!
//! Background task that periodically writes a store to its backend.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::persistence::Persistence;
use crate::store::KeyValueStoreBase;

// == Flush Timer ==
/// Handle to a running flush task. Dropping it cancels the task.
#[derive(Debug)]
pub struct FlushTimer {
    handle: JoinHandle<()>,
}

impl FlushTimer {
    /// Stops the task. Later ticks will not run.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for FlushTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a task that calls [`KeyValueStoreBase::on_flush_timer`] every
/// `interval`.
///
/// The task only holds a weak reference and exits on the first tick after
/// the store is gone. Each sleep starts once the previous flush finished.
/// Must be called from within a Tokio runtime, with a non-zero interval.
///
/// # Example
/// ```ignore
/// let state = Arc::new(RwLock::new(KeyValueStoreBase::new(backend, interval)));
/// let timer = spawn_flush_task(Arc::downgrade(&state), interval);
/// // Later, during shutdown:
/// drop(timer);
/// ```
pub fn spawn_flush_task<P: Persistence>(
    store: Weak<RwLock<KeyValueStoreBase<P>>>,
    interval: Duration,
) -> FlushTimer {
    debug_assert!(!interval.is_zero(), "flush task needs a non-zero interval");

    let handle = tokio::spawn(async move {
        info!("Starting flush task with interval of {:?}", interval);

        let mut delay = interval;
        loop {
            tokio::time::sleep(delay).await;

            let Some(state) = store.upgrade() else {
                debug!("Store dropped, stopping flush task");
                break;
            };
            delay = state.write().await.on_flush_timer();
        }
    });

    FlushTimer { handle }
}
