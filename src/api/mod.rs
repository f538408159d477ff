//! API Module
//!
//! HTTP handlers and routing for the key-value store REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Remove a key
//! - `GET /keys` - List all keys
//! - `POST /flush` - Write the store to disk now
//! - `GET /stats` - Get flush statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
