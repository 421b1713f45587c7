//! Cache Statistics Module
//!
//! Running hit/miss/eviction counters and the introspection snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Metrics ==
/// Running counters updated by the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheMetrics {
    /// Lookups that returned a fresh payload
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Entry Stats ==
/// Point-in-time view of one cached entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryStats {
    pub key: String,
    pub stored_at: DateTime<Utc>,
    pub age_ms: u64,
    pub ttl_ms: u64,
    /// Length of the payload as compact JSON
    pub size_bytes: usize,
}

// == Cache Stats ==
/// Snapshot returned by [`CacheStore::stats`](crate::cache::CacheStore::stats).
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub max_entries: usize,
    pub default_ttl_ms: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub hit_rate: f64,
    /// Entries ordered by key
    pub entries: Vec<EntryStats>,
}

impl CacheStats {
    /// Looks up the snapshot of a single key.
    pub fn entry(&self, key: &str) -> Option<&EntryStats> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Sum of all entry sizes.
    pub fn total_size_bytes(&self) -> usize {
        self.entries.iter().map(|entry| entry.size_bytes).sum()
    }
}
