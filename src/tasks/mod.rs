//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a store is open.
//!
//! # Tasks
//! - Flush: writes the store to its backend once per flush interval

mod flush;

pub use flush::{spawn_flush_task, FlushTimer};
