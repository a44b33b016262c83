//! Cache Events Module
//!
//! Optional observer hook for entry lifecycle events. Observers are notified
//! after the cache lock has been released, so an observer may call back into
//! the cache.

use std::fmt::Debug;

use tracing::{debug, info};

// == Cache Event ==
/// Lifecycle event of a single cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent<K, V> {
    /// A new key was stored
    Inserted { key: K },
    /// An existing key received a new value
    Updated { key: K },
    /// The least recently used entry was dropped to make room
    Evicted { key: K, value: V },
    /// An entry was removed explicitly
    Removed { key: K },
}

impl<K, V> CacheEvent<K, V> {
    /// Returns the key the event is about.
    pub fn key(&self) -> &K {
        match self {
            CacheEvent::Inserted { key }
            | CacheEvent::Updated { key }
            | CacheEvent::Evicted { key, .. }
            | CacheEvent::Removed { key } => key,
        }
    }
}

// == Observer Trait ==
/// Receives cache events.
pub trait CacheObserver<K, V>: Send + Sync {
    fn on_event(&self, event: &CacheEvent<K, V>);
}

impl<K, V, F> CacheObserver<K, V> for F
where
    F: Fn(&CacheEvent<K, V>) + Send + Sync,
{
    fn on_event(&self, event: &CacheEvent<K, V>) {
        self(event)
    }
}

// == Tracing Observer ==
/// Forwards cache events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<K: Debug, V> CacheObserver<K, V> for TracingObserver {
    fn on_event(&self, event: &CacheEvent<K, V>) {
        match event {
            CacheEvent::Inserted { key } => debug!(?key, "cache insert"),
            CacheEvent::Updated { key } => debug!(?key, "cache update"),
            CacheEvent::Evicted { key, .. } => info!(?key, "cache eviction: capacity reached"),
            CacheEvent::Removed { key } => debug!(?key, "cache remove"),
        }
    }
}
