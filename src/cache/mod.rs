//! Cache Module
//!
//! Provides a fixed-capacity, thread-safe LRU cache built from a HashMap
//! lookup index and an arena-backed recency list.

mod entry;
mod events;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, EntryId};
pub use events::{CacheEvent, CacheObserver, TracingObserver};
pub use recency::RecencyList;
pub use stats::CacheStats;
pub use store::LruCache;
