//! Flush Scheduler Module
//!
//! Decides whether a mutation flushes right away or waits for the next tick.

use std::time::Duration;

// == Flush Scheduler ==
/// Tracks whether a periodic flush is armed for the store.
///
/// A non-zero interval arms the timer at construction and it stays armed for
/// the life of the store, since each tick re-arms it. A zero interval never
/// arms, so every mutation is flushed synchronously.
#[derive(Debug, Clone)]
pub struct FlushScheduler {
    interval: Duration,
    armed: bool,
}

impl FlushScheduler {
    // == Constructor ==
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: !interval.is_zero(),
        }
    }

    /// Interval between periodic flushes, zero when debounce is disabled.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true while a future tick is scheduled.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    // == Mutation Policy ==
    /// Returns true if a mutation that just happened must be flushed now.
    pub fn should_flush_on_mutation(&self) -> bool {
        !self.armed
    }

    // == Tick ==
    /// Called when the timer fires. Returns the delay until the next tick.
    pub fn on_tick(&mut self) -> Duration {
        self.armed = !self.interval.is_zero();
        self.interval
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_never_armed() {
        let scheduler = FlushScheduler::new(Duration::ZERO);
        assert!(!scheduler.is_armed());
        assert!(scheduler.should_flush_on_mutation());
    }

    #[test]
    fn test_nonzero_interval_armed() {
        let scheduler = FlushScheduler::new(Duration::from_millis(100));
        assert!(scheduler.is_armed());
        assert!(!scheduler.should_flush_on_mutation());
    }

    #[test]
    fn test_tick_rearms() {
        let mut scheduler = FlushScheduler::new(Duration::from_millis(250));
        let next = scheduler.on_tick();
        assert_eq!(next, Duration::from_millis(250));
        assert!(scheduler.is_armed());
        assert!(!scheduler.should_flush_on_mutation());
    }
}
