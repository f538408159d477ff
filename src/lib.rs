//! Persistent KV - an in-memory key-value store with debounced persistence
//!
//! Keeps a byte-string map in memory and writes it to a backing store in a
//! length-prefixed format, either after every mutation or once per flush
//! interval.
//!
//! ```
//! use std::time::Duration;
//! use persistent_kv::persistence::MemoryStore;
//! use persistent_kv::store::{Iterate, KeyValueStoreBase};
//!
//! let backend = MemoryStore::new();
//! let mut store = KeyValueStoreBase::new(backend.clone(), Duration::ZERO);
//! store.add_or_update("greeting", "hello\nworld");
//! assert_eq!(store.get(b"greeting"), Some(&b"hello\nworld"[..]));
//! assert_eq!(backend.contents().unwrap(), b"8\ngreeting11\nhello\nworld");
//!
//! let mut count = 0;
//! store.iterate(|_, _| {
//!     count += 1;
//!     Iterate::Continue
//! });
//! assert_eq!(count, 1);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, StoreError};
pub use store::{Iterate, KeyValueStoreBase, PersistentKeyValueStore};
pub use tasks::spawn_flush_task;
