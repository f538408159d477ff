//! Error types for the key-value store server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Unified error type for store and server operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing store could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key not present in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A flush timer was requested outside a Tokio runtime
    #[error("A Tokio runtime is required to run the flush timer")]
    NoRuntime,
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::Io(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::NoRuntime => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
