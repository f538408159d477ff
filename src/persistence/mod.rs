//! Persistence Module
//!
//! Byte sinks and sources the store writes its serialized contents to.
//!
//! # Backends
//! - `FileStore`: a single file on disk, replaced atomically on each write
//! - `MemoryStore`: an in-process buffer, mostly useful in tests

mod file;
mod memory;

use std::io;

pub use file::FileStore;
pub use memory::MemoryStore;

// == Persistence Trait ==
/// Durable medium behind a store.
///
/// The store never interprets errors from these calls beyond logging them.
pub trait Persistence: Send + Sync + 'static {
    /// Reads the full stored buffer. Returns `None` if nothing was stored yet.
    fn load(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the stored buffer with `contents`.
    fn persist(&mut self, contents: &[u8]) -> io::Result<()>;
}
