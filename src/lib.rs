//! Bounded LRU - A thread-safe, fixed-capacity LRU cache
//!
//! Provides O(1) `get` and `put` under concurrent access, evicting the least
//! recently used entry when full, plus an HTTP front-end for the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheEvent, CacheObserver, CacheStats, LruCache, TracingObserver};
pub use config::Config;
pub use error::{CacheError, Result};
