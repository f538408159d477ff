//! API Handlers
//!
//! HTTP request handlers for each store endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{Result, StoreError};
use crate::models::{
    DeleteResponse, FlushResponse, GetResponse, HealthResponse, KeysResponse, SetRequest,
    SetResponse, StatsResponse,
};
use crate::persistence::{FileStore, Persistence};
use crate::store::{Iterate, PersistentKeyValueStore};

/// Application state shared across all handlers.
///
/// Handlers share one store handle; its flush timer stops when the last
/// clone of the state is dropped.
pub struct AppState<P: Persistence = FileStore> {
    pub store: Arc<PersistentKeyValueStore<P>>,
}

impl<P: Persistence> AppState<P> {
    /// Creates a new AppState around an open store.
    pub fn new(store: PersistentKeyValueStore<P>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<P: Persistence> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl AppState<FileStore> {
    /// Opens the file-backed store described by the Config.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Ok(Self::new(PersistentKeyValueStore::from_config(config)?))
    }
}

/// Handler for PUT /set
pub async fn set_handler<P: Persistence>(
    State(state): State<AppState<P>>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    state.store.add_or_update(req.key.clone(), req.value).await;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler<P: Persistence>(
    State(state): State<AppState<P>>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.store.get(key.as_bytes()).await {
        Some(value) => Ok(Json(GetResponse::new(key, &value))),
        None => Err(StoreError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
///
/// Removing a missing key succeeds, like the store's own remove.
pub async fn delete_handler<P: Persistence>(
    State(state): State<AppState<P>>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.store.remove(key.as_bytes()).await;
    Json(DeleteResponse::new(key))
}

/// Handler for GET /keys
pub async fn keys_handler<P: Persistence>(State(state): State<AppState<P>>) -> Json<KeysResponse> {
    let mut keys = Vec::new();
    state
        .store
        .iterate(|key, _| {
            keys.push(String::from_utf8_lossy(key).into_owned());
            Iterate::Continue
        })
        .await;
    keys.sort();

    Json(KeysResponse { keys })
}

/// Handler for POST /flush
pub async fn flush_handler<P: Persistence>(
    State(state): State<AppState<P>>,
) -> Result<Json<FlushResponse>> {
    let bytes = state.store.flush().await?;
    Ok(Json(FlushResponse::new(bytes)))
}

/// Handler for GET /stats
pub async fn stats_handler<P: Persistence>(
    State(state): State<AppState<P>>,
) -> Json<StatsResponse> {
    let interval = state.store.flush_interval().await;
    let stats = state.store.stats().await;

    Json(StatsResponse::new(interval.as_millis() as u64, stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
