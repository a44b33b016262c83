//! Cache Entry Module
//!
//! Defines the arena slot that holds one cached key-value pair together with
//! its links in the recency list.

// == Entry Handle ==
/// Stable handle to a slot in the recency list's arena.
///
/// Handles are only meaningful while the entry is live; after eviction or
/// removal the slot is recycled and the same index may name another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

// == Cache Entry ==
/// A single cached key-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The key, kept so eviction can clean the lookup index
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

// == Arena Slot ==
/// One slot of the arena.
///
/// Sentinels carry no entry. Free slots carry no entry either and sit on the
/// free list until reused.
#[derive(Debug)]
pub(crate) struct Slot<K, V> {
    pub(crate) entry: Option<CacheEntry<K, V>>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn sentinel() -> Self {
        Self {
            entry: None,
            prev: 0,
            next: 0,
        }
    }

    pub(crate) fn occupied(entry: CacheEntry<K, V>) -> Self {
        Self {
            entry: Some(entry),
            prev: 0,
            next: 0,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("key", 42);
        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, 42);
    }

    #[test]
    fn test_sentinel_slot_is_empty() {
        let slot: Slot<u32, u32> = Slot::sentinel();
        assert!(slot.entry.is_none());
    }

    #[test]
    fn test_entry_id_index() {
        assert_eq!(EntryId(7).index(), 7);
    }
}
