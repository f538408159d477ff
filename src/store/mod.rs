//! Store Module
//!
//! In-memory key-value store persisted through a length-prefixed codec,
//! with debounced flushing.

mod base;
pub mod codec;
mod persistent;
mod scheduler;
mod stats;
pub mod verify;


// Re-export public types
pub use base::KeyValueStoreBase;
pub use codec::ParseError;
pub use persistent::PersistentKeyValueStore;
pub use scheduler::FlushScheduler;
pub use stats::FlushStats;

// == Iterate ==
/// Returned by iteration callbacks to keep going or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterate {
    Continue,
    Break,
}
