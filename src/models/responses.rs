//! Response DTOs for the store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::FlushStats;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, with invalid UTF-8 replaced
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse from raw stored bytes
    pub fn new(key: impl Into<String>, value: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' removed", key),
            key,
        }
    }
}

/// Response body for the key listing (GET /keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// All keys, sorted
    pub keys: Vec<String>,
}

/// Response body for an explicit flush (POST /flush)
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    pub message: String,
    /// Size of the buffer written
    pub bytes: usize,
}

impl FlushResponse {
    pub fn new(bytes: usize) -> Self {
        Self {
            message: format!("Flushed {} bytes", bytes),
            bytes,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Flush interval in milliseconds, 0 when every mutation flushes
    pub flush_interval_ms: u64,
    #[serde(flatten)]
    pub stats: FlushStats,
}

impl StatsResponse {
    pub fn new(flush_interval_ms: u64, stats: FlushStats) -> Self {
        Self {
            flush_interval_ms,
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_lossy_value() {
        let resp = GetResponse::new("k", &[b'o', b'k', 0xff]);
        assert_eq!(resp.value, "ok\u{fffd}");
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("gone");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("gone"));
        assert!(json.contains("removed"));
    }

    #[test]
    fn test_stats_response_flattens() {
        let mut stats = FlushStats::new();
        stats.record_flush(12);
        let json = serde_json::to_value(StatsResponse::new(250, stats)).unwrap();
        assert_eq!(json["flush_interval_ms"], 250);
        assert_eq!(json["flushes"], 1);
        assert_eq!(json["last_flush_bytes"], 12);
    }

    #[test]
    fn test_flush_response() {
        let resp = FlushResponse::new(64);
        assert_eq!(resp.bytes, 64);
        assert!(resp.message.contains("64"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
