//! Recency List Module
//!
//! Arena-backed doubly-linked list ordering entries from least recently used
//! to most recently used.
//!
//! Slots are addressed by index. Slot 0 is the head sentinel (LRU boundary)
//! and slot 1 is the tail sentinel (MRU boundary); both always exist, so
//! linking and unlinking never branch on an empty list or a boundary node.
//! Freed slots go on a free list and are reused by later insertions.

use crate::cache::entry::{CacheEntry, EntryId, Slot};
use crate::error::{CacheError, Result};

const HEAD: usize = 0;
const TAIL: usize = 1;

// == Recency List ==
/// Doubly-linked recency order over an arena of slots.
///
/// Walking `next` links from the head sentinel visits entries from least to
/// most recently used.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a list holding only the two sentinels, linked to each other.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before the
    /// arena has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(2));
        slots.push(Slot::sentinel());
        slots.push(Slot::sentinel());
        slots[HEAD].next = TAIL;
        slots[TAIL].prev = HEAD;

        Self {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Push MRU ==
    /// Stores a new entry and links it at the most recently used end.
    pub fn push_mru(&mut self, entry: CacheEntry<K, V>) -> EntryId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Slot::occupied(entry);
                idx
            }
            None => {
                self.slots.push(Slot::occupied(entry));
                self.slots.len() - 1
            }
        };
        self.attach_mru(idx);
        self.len += 1;
        EntryId(idx)
    }

    // == Move To MRU ==
    /// Marks an entry as most recently used.
    ///
    /// Returns false if the handle does not name a live entry.
    pub fn move_to_mru(&mut self, id: EntryId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        if self.slots[TAIL].prev != id.0 {
            self.detach(id.0);
            self.attach_mru(id.0);
        }
        true
    }

    // == Remove ==
    /// Unlinks an entry and releases its slot.
    pub fn remove(&mut self, id: EntryId) -> Option<CacheEntry<K, V>> {
        if !self.is_live(id) {
            return None;
        }
        self.detach(id.0);
        let entry = self.slots[id.0].entry.take();
        self.free.push(id.0);
        self.len -= 1;
        entry
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<CacheEntry<K, V>> {
        let first = self.slots[HEAD].next;
        if first == TAIL {
            return None;
        }
        self.remove(EntryId(first))
    }

    // == Peek LRU ==
    /// Returns the least recently used entry without unlinking it.
    pub fn peek_lru(&self) -> Option<&CacheEntry<K, V>> {
        self.slots[self.slots[HEAD].next].entry.as_ref()
    }

    // == Accessors ==
    pub fn get(&self, id: EntryId) -> Option<&CacheEntry<K, V>> {
        if id.0 < 2 {
            return None;
        }
        self.slots.get(id.0).and_then(|slot| slot.entry.as_ref())
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut CacheEntry<K, V>> {
        if id.0 < 2 {
            return None;
        }
        self.slots.get_mut(id.0).and_then(|slot| slot.entry.as_mut())
    }

    /// Checks whether a handle names a live entry.
    pub fn is_live(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry; only the sentinels remain.
    pub fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates live entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.slots[HEAD].next,
            remaining: self.len,
        }
    }

    // == Validate ==
    /// Walks the list from head to tail and checks that links are mutually
    /// consistent and that the walk sees exactly `len` entries.
    pub fn validate(&self) -> Result<()> {
        let mut prev = HEAD;
        let mut cursor = self.slots[HEAD].next;
        let mut seen = 0usize;

        while cursor != TAIL {
            if seen > self.len {
                return Err(CacheError::InvariantViolation(format!(
                    "walk exceeded {} entries without reaching the tail sentinel",
                    self.len
                )));
            }
            let slot = self.slots.get(cursor).ok_or_else(|| {
                CacheError::InvariantViolation(format!("link to missing slot {}", cursor))
            })?;
            if slot.entry.is_none() {
                return Err(CacheError::InvariantViolation(format!(
                    "slot {} is linked but holds no entry",
                    cursor
                )));
            }
            if slot.prev != prev {
                return Err(CacheError::InvariantViolation(format!(
                    "slot {} points back to {} instead of {}",
                    cursor, slot.prev, prev
                )));
            }
            seen += 1;
            prev = cursor;
            cursor = slot.next;
        }

        if self.slots[TAIL].prev != prev {
            return Err(CacheError::InvariantViolation(format!(
                "tail sentinel points back to {} instead of {}",
                self.slots[TAIL].prev, prev
            )));
        }
        if seen != self.len {
            return Err(CacheError::InvariantViolation(format!(
                "walk saw {} entries but length is {}",
                seen, self.len
            )));
        }
        if self.slots.len() - 2 != self.len + self.free.len() {
            return Err(CacheError::InvariantViolation(format!(
                "{} slots do not account for {} live and {} free",
                self.slots.len() - 2,
                self.len,
                self.free.len()
            )));
        }
        Ok(())
    }

    // == Link Surgery ==
    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    fn attach_mru(&mut self, idx: usize) {
        let prev = self.slots[TAIL].prev;
        self.slots[prev].next = idx;
        self.slots[TAIL].prev = idx;
        self.slots[idx].prev = prev;
        self.slots[idx].next = TAIL;
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Iterator over live entries in LRU to MRU order.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (EntryId, &'a CacheEntry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL || self.remaining == 0 {
            return None;
        }
        let idx = self.cursor;
        let slot = &self.list.slots[idx];
        self.cursor = slot.next;
        self.remaining -= 1;
        slot.entry.as_ref().map(|entry| (EntryId(idx), entry))
    }
}
