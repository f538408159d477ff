//! API Routes
//!
//! Configures the Axum router with all store endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, flush_handler, get_handler, health_handler, keys_handler, set_handler,
    stats_handler, AppState,
};
use crate::persistence::Persistence;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router<P: Persistence>(state: AppState<P>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler::<P>))
        .route("/get/:key", get(get_handler::<P>))
        .route("/del/:key", delete(delete_handler::<P>))
        .route("/keys", get(keys_handler::<P>))
        .route("/flush", post(flush_handler::<P>))
        .route("/stats", get(stats_handler::<P>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
