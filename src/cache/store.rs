//! Cache Store Module
//!
//! Main cache engine combining a HashMap lookup index with an arena-backed
//! recency list, both guarded by a single readers-writer lock.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::entry::{CacheEntry, EntryId};
use crate::cache::events::{CacheEvent, CacheObserver};
use crate::cache::recency::RecencyList;
use crate::cache::stats::{CacheStats, StatsRecorder};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED: usize = 1024;

// == Locked State ==
/// Index and recency order. Never locked separately.
struct CacheState<K, V> {
    index: HashMap<K, EntryId>,
    order: RecencyList<K, V>,
}

// == LRU Cache ==
/// Fixed-capacity, thread-safe least recently used cache.
///
/// `get` and `put` run in O(1) expected time. When a `put` of a new key
/// would exceed the capacity, the least recently used entry is evicted
/// before `put` returns.
pub struct LruCache<K, V> {
    /// Index and recency list
    state: RwLock<CacheState<K, V>>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Performance statistics
    stats: StatsRecorder,
    /// Optional lifecycle observer
    observer: Option<Arc<dyn CacheObserver<K, V>>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }

        let reserved = capacity.min(MAX_PREALLOCATED);
        Ok(Self {
            state: RwLock::new(CacheState {
                index: HashMap::with_capacity(reserved),
                order: RecencyList::with_capacity(reserved),
            }),
            capacity,
            stats: StatsRecorder::default(),
            observer: None,
        })
    }

    /// Creates a cache that reports lifecycle events to `observer`.
    pub fn with_observer(
        capacity: usize,
        observer: impl CacheObserver<K, V> + 'static,
    ) -> Result<Self> {
        let mut cache = Self::new(capacity)?;
        cache.observer = Some(Arc::new(observer));
        Ok(cache)
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_entries)
    }

    // == Get ==
    /// Retrieves a value and marks the key as most recently used.
    ///
    /// The presence probe runs under the shared lock, so concurrent misses
    /// do not serialize. A hit escalates to the exclusive lock and looks the
    /// key up again: between the two phases another thread may have evicted
    /// or removed it, and its slot may already hold a different key.
    pub fn get(&self, key: &K) -> Option<V> {
        if !self.state.read().index.contains_key(key) {
            self.stats.record_miss();
            return None;
        }

        let mut state = self.state.write();
        let CacheState { index, order } = &mut *state;

        let value = index.get(key).copied().and_then(|id| {
            order.move_to_mru(id);
            order.get(id).map(|entry| entry.value.clone())
        });
        drop(state);

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Put ==
    /// Stores a key-value pair as the most recently used entry.
    ///
    /// An existing key is updated in place. A new key is linked at the MRU
    /// end; if that takes the cache over capacity, the entry next to the
    /// head sentinel (the least recently used one) is evicted.
    pub fn put(&self, key: K, value: V) {
        let mut events = Vec::new();
        {
            let mut state = self.state.write();
            let CacheState { index, order } = &mut *state;

            if let Some(&id) = index.get(&key) {
                if let Some(entry) = order.get_mut(id) {
                    entry.value = value;
                }
                order.move_to_mru(id);
                self.stats.record_update();
                events.push(CacheEvent::Updated { key });
            } else {
                let id = order.push_mru(CacheEntry::new(key.clone(), value));
                index.insert(key.clone(), id);
                self.stats.record_insert();
                events.push(CacheEvent::Inserted { key });

                if index.len() > self.capacity {
                    if let Some(evicted) = order.pop_lru() {
                        index.remove(&evicted.key);
                        self.stats.record_eviction();
                        events.push(CacheEvent::Evicted {
                            key: evicted.key,
                            value: evicted.value,
                        });
                    }
                }
            }
        }
        self.notify(&events);
    }

    // == Remove ==
    /// Removes a key, returning its value if it was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        let removed = {
            let mut state = self.state.write();
            let CacheState { index, order } = &mut *state;
            index.remove(key).and_then(|id| order.remove(id))
        }?;

        self.stats.record_removal();
        let value = removed.value;
        self.notify(&[CacheEvent::Removed { key: removed.key }]);
        Some(value)
    }

    // == Peek ==
    /// Retrieves a value without changing its recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        let state = self.state.read();
        let id = *state.index.get(key)?;
        state.order.get(id).map(|entry| entry.value.clone())
    }

    // == Contains ==
    /// Checks for a key without changing its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.state.read().index.contains_key(key)
    }

    // == Clear ==
    /// Drops every entry, counting each one as a removal. Capacity is kept.
    pub fn clear(&self) {
        let mut events = Vec::new();
        {
            let mut state = self.state.write();
            let CacheState { index, order } = &mut *state;

            while let Some(entry) = order.pop_lru() {
                self.stats.record_removal();
                events.push(CacheEvent::Removed { key: entry.key });
            }
            index.clear();
            order.clear();
        }
        self.notify(&events);
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.state.read().index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys In LRU Order ==
    /// Returns the keys from least to most recently used.
    pub fn keys_lru_order(&self) -> Vec<K> {
        self.state
            .read()
            .order
            .iter()
            .map(|(_, entry)| entry.key.clone())
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len(), self.capacity)
    }

    // == Check Invariants ==
    /// Verifies that the index and the recency list describe the same set of
    /// entries and that the cache is within capacity.
    pub fn check_invariants(&self) -> Result<()> {
        let state = self.state.read();
        state.order.validate()?;

        if state.index.len() != state.order.len() {
            return Err(CacheError::InvariantViolation(format!(
                "index holds {} keys but recency list holds {} entries",
                state.index.len(),
                state.order.len()
            )));
        }
        if state.index.len() > self.capacity {
            return Err(CacheError::InvariantViolation(format!(
                "{} entries exceed capacity {}",
                state.index.len(),
                self.capacity
            )));
        }
        for (id, entry) in state.order.iter() {
            if state.index.get(&entry.key) != Some(&id) {
                return Err(CacheError::InvariantViolation(format!(
                    "entry in slot {} is not indexed under its key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn notify(&self, events: &[CacheEvent<K, V>]) {
        if let Some(observer) = &self.observer {
            for event in events {
                observer.on_event(event);
            }
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &state.order.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
