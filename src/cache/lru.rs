//! LRU Tracker Module
//!
//! Orders keys by a monotonically increasing access counter for eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every touch stamps the key with the next counter value. Keys are indexed
/// both ways so the least recently used key is the first entry of `by_tick`,
/// which makes the victim choice independent of hash iteration order.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Last value handed out
    counter: u64,
    /// Key to its latest access stamp
    by_key: HashMap<String, u64>,
    /// Access stamp to key, oldest first
    by_tick: BTreeMap<u64, String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        self.counter += 1;
        if let Some(previous) = self.by_key.insert(key.to_string(), self.counter) {
            self.by_tick.remove(&previous);
        }
        self.by_tick.insert(self.counter, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.by_key.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.by_key.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.by_tick.first_key_value().map(|(_, key)| key)
    }

    /// Access stamp of a key, if tracked.
    pub fn access_tick(&self, key: &str) -> Option<u64> {
        self.by_key.get(key).copied()
    }

    /// Current value of the access counter.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    // == Clear ==
    /// Forgets all keys and restarts the counter at zero.
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_tick.clear();
        self.counter = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }
}
