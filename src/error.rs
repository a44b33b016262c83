//! Error types for the cache and its HTTP front-end
//!
//! Provides unified error handling using thiserror. A cache miss is not an
//! error: `LruCache::get` returns `None`. `NotFound` only exists so the HTTP
//! layer can report a miss as a 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its HTTP front-end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity (or another setting) is not usable; no cache is produced
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Index and recency list disagree
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Key not present (HTTP layer only)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data (HTTP layer only)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidConfiguration(_) | CacheError::InvariantViolation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
