//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{LruCache, TracingObserver};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, PutRequest, PutResponse, StatsResponse,
};

/// Cache type served over HTTP.
pub type SharedCache = Arc<LruCache<String, String>>;

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so handlers share it through a plain
/// `Arc` and never hold a lock across an await point.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: LruCache<String, String>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache reports its lifecycle events through `tracing`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = LruCache::with_observer(config.max_entries, TracingObserver)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /put
///
/// Stores a key-value pair, evicting the least recently used entry if the
/// cache is full.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.put(req.key.clone(), req.value);

    Ok(Json(PutResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// A miss is reported as 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    match state.cache.remove(&key) {
        Some(_) => Ok(Json(DeleteResponse::new(key))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
