//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::store::verify;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// File the store is loaded from and flushed to
    pub data_file: PathBuf,
    /// Milliseconds between periodic flushes, 0 flushes on every mutation
    pub flush_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Check that iteration callbacks leave the store untouched
    pub verify_iteration: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_FILE` - Path of the store file (default: ./data/kv_store.dat)
    /// - `FLUSH_INTERVAL_MS` - Flush interval in milliseconds (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `VERIFY_ITERATION` - true/false/1/0 (default: on in debug builds)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_file: env::var("DATA_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            flush_interval_ms: env::var("FLUSH_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.flush_interval_ms),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            verify_iteration: env::var("VERIFY_ITERATION")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.verify_iteration),
        }
    }

    /// Flush interval as a Duration.
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./data/kv_store.dat"),
            flush_interval_ms: 1000,
            server_port: 3000,
            verify_iteration: verify::VERIFY_BY_DEFAULT,
        }
    }
}
