//! Cache Store Module
//!
//! Response cache combining HashMap storage with LRU tracking and TTL expiry.
//! Expired entries are swept on every read and write, so no background task
//! is needed to keep stale payloads from being served.

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::cache::{generate_key, CacheEntry, CacheMetrics, CacheStats, EntryStats, LruTracker};
use crate::config::CacheConfig;
use crate::models::QueryParams;

// == Cache Store ==
/// Bounded response cache with LRU eviction and per-entry TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to cached response
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Hit/miss/eviction counters
    metrics: CacheMetrics,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL for entries stored without an explicit one
    default_ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// A capacity of zero is raised to one so that a freshly written entry
    /// can always be held.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            metrics: CacheMetrics::new(),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    /// Creates a store from cache configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.default_ttl)
    }

    // == Get ==
    /// Looks up the cached response for a request.
    ///
    /// Returns `None` on a miss, which is distinct from a cached JSON `null`.
    /// A hit marks the entry as most recently used.
    pub fn get(&mut self, endpoint: &str, params: &QueryParams) -> Option<Value> {
        self.cleanup_expired();

        let key = generate_key(endpoint, params);
        self.get_by_key(&key)
    }

    fn get_by_key(&mut self, key: &str) -> Option<Value> {
        let fresh = match self.entries.get(key).map(CacheEntry::is_valid) {
            Some(true) => self.entries.get(key).map(|entry| entry.payload.clone()),
            Some(false) => {
                // Expired between the sweep and the lookup
                self.remove_entry(key);
                self.metrics.record_expirations(1);
                None
            }
            None => None,
        };

        match fresh {
            Some(payload) => {
                self.lru.touch(key);
                self.metrics.record_hit();
                debug!(key = %key, "cache hit");
                Some(payload)
            }
            None => {
                self.metrics.record_miss();
                debug!(key = %key, "cache miss");
                None
            }
        }
    }

    // == Set ==
    /// Stores a response for a request.
    ///
    /// Overwrites any existing entry for the same key and restarts its TTL.
    /// If the store is full, the least recently used entry is evicted first,
    /// even when the write replaces an existing key.
    ///
    /// # Arguments
    /// * `endpoint` - Request path the payload was fetched from
    /// * `payload` - Response body
    /// * `params` - Request parameters
    /// * `ttl` - Lifetime override (uses default_ttl if None)
    pub fn set(&mut self, endpoint: &str, payload: Value, params: &QueryParams, ttl: Option<Duration>) {
        self.cleanup_expired();

        let key = generate_key(endpoint, params);
        self.set_by_key(key, payload, ttl);
    }

    fn set_by_key(&mut self, key: String, payload: Value, ttl: Option<Duration>) {
        if self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.metrics.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key.clone(), CacheEntry::new(payload, ttl));
        self.lru.touch(&key);
    }

    // == Invalidate ==
    /// Removes the entry for one exact request. Returns whether one existed.
    pub fn invalidate(&mut self, endpoint: &str, params: &QueryParams) -> bool {
        let key = generate_key(endpoint, params);
        let removed = self.remove_entry(&key);
        if removed {
            debug!(key = %key, "invalidated cache entry");
        }
        removed
    }

    // == Invalidate Pattern ==
    /// Removes every entry whose key matches `pattern`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_pattern(&mut self, pattern: &Regex) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect();

        for key in &matching {
            self.remove_entry(key);
        }

        debug!(pattern = %pattern, removed = matching.len(), "invalidated matching entries");
        matching.len()
    }

    // == Clear ==
    /// Removes all entries and restarts the access counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.metrics.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the store without sweeping it.
    pub fn stats(&self) -> CacheStats {
        let mut entries: Vec<EntryStats> = self
            .entries
            .iter()
            .map(|(key, entry)| EntryStats {
                key: key.clone(),
                stored_at: entry.stored_at,
                age_ms: entry.age().as_millis() as u64,
                ttl_ms: entry.ttl.as_millis() as u64,
                size_bytes: entry.approximate_size(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        CacheStats {
            size: self.entries.len(),
            max_entries: self.max_entries,
            default_ttl_ms: self.default_ttl.as_millis() as u64,
            hits: self.metrics.hits,
            misses: self.metrics.misses,
            evictions: self.metrics.evictions,
            expirations: self.metrics.expirations,
            hit_rate: self.metrics.hit_rate(),
            entries,
        }
    }

    /// Whether a fresh entry exists for the request. Does not touch LRU order.
    pub fn contains(&self, endpoint: &str, params: &QueryParams) -> bool {
        let key = generate_key(endpoint, params);
        self.entries.get(&key).is_some_and(CacheEntry::is_valid)
    }

    // == Length ==
    /// Returns the current number of entries, including not yet swept ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    const PRODUCTS: &str = "/store/products";
    const REGIONS: &str = "/store/regions";

    fn store(max_entries: usize) -> CacheStore {
        CacheStore::new(max_entries, Duration::from_secs(300))
    }

    fn page(limit: u32) -> QueryParams {
        QueryParams::new().with("limit", limit)
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 100);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut store = CacheStore::new(0, Duration::from_secs(1));
        store.set(PRODUCTS, json!(1), &QueryParams::new(), None);
        assert_eq!(store.max_entries(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100);

        store.set(PRODUCTS, json!({"products": [], "count": 0}), &page(1), None);
        let value = store.get(PRODUCTS, &page(1));

        assert_eq!(value, Some(json!({"products": [], "count": 0})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);
        assert_eq!(store.get(PRODUCTS, &page(1)), None);
    }

    #[test]
    fn test_cached_null_is_distinct_from_miss() {
        let mut store = store(100);

        store.set(REGIONS, Value::Null, &QueryParams::new(), None);

        assert_eq!(store.get(REGIONS, &QueryParams::new()), Some(Value::Null));
        assert_eq!(store.get(PRODUCTS, &QueryParams::new()), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        store.set(PRODUCTS, json!("v1"), &page(1), None);
        store.set(PRODUCTS, json!("v2"), &page(1), None);

        assert_eq!(store.get(PRODUCTS, &page(1)), Some(json!("v2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_at_capacity_evicts_lru() {
        let mut store = store(2);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(PRODUCTS, json!(2), &page(2), None);
        assert!(store.get(PRODUCTS, &page(1)).is_some());

        // page(2) is now the oldest and goes, even though page(1) already exists
        store.set(PRODUCTS, json!(3), &page(1), None);

        assert_eq!(store.len(), 1);
        assert!(!store.contains(PRODUCTS, &page(2)));
        assert_eq!(store.get(PRODUCTS, &page(1)), Some(json!(3)));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_of_oldest_key_at_capacity_evicts_itself() {
        let mut store = store(2);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(PRODUCTS, json!(2), &page(2), None);
        store.set(PRODUCTS, json!(3), &page(1), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.get(PRODUCTS, &page(1)), Some(json!(3)));
        assert_eq!(store.get(PRODUCTS, &page(2)), Some(json!(2)));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store(100);

        store.set(PRODUCTS, json!(1), &page(1), Some(Duration::from_millis(100)));

        sleep(Duration::from_millis(40));
        assert!(store.get(PRODUCTS, &page(1)).is_some());

        sleep(Duration::from_millis(100));
        assert_eq!(store.get(PRODUCTS, &page(1)), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_default_ttl_applies() {
        let mut store = CacheStore::new(10, Duration::from_millis(50));

        store.set(REGIONS, json!([]), &QueryParams::new(), None);
        store.set(PRODUCTS, json!([]), &QueryParams::new(), Some(Duration::from_secs(60)));

        sleep(Duration::from_millis(80));

        assert_eq!(store.get(REGIONS, &QueryParams::new()), None);
        assert!(store.get(PRODUCTS, &QueryParams::new()).is_some());
    }

    #[test]
    fn test_sweep_runs_on_unrelated_access() {
        let mut store = store(100);

        store.set(PRODUCTS, json!(1), &page(1), Some(Duration::from_millis(30)));
        store.set(PRODUCTS, json!(2), &page(2), Some(Duration::from_millis(30)));
        sleep(Duration::from_millis(50));

        assert_eq!(store.len(), 2);
        let _ = store.get(REGIONS, &QueryParams::new());
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().expirations, 2);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(PRODUCTS, json!(2), &page(2), None);
        store.set(PRODUCTS, json!(3), &page(3), None);
        store.set(PRODUCTS, json!(4), &page(4), None);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(PRODUCTS, &page(1)), None);
        assert!(store.get(PRODUCTS, &page(2)).is_some());
        assert!(store.get(PRODUCTS, &page(3)).is_some());
        assert!(store.get(PRODUCTS, &page(4)).is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(3);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(PRODUCTS, json!(2), &page(2), None);
        store.set(PRODUCTS, json!(3), &page(3), None);

        store.get(PRODUCTS, &page(1));

        store.set(PRODUCTS, json!(4), &page(4), None);

        assert!(store.get(PRODUCTS, &page(1)).is_some());
        assert_eq!(store.get(PRODUCTS, &page(2)), None);
    }

    #[test]
    fn test_invalidate_exact_entry() {
        let mut store = store(10);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(PRODUCTS, json!(2), &page(2), None);

        assert!(store.invalidate(PRODUCTS, &page(1)));
        assert!(!store.invalidate(PRODUCTS, &page(1)));

        assert_eq!(store.get(PRODUCTS, &page(1)), None);
        assert!(store.get(PRODUCTS, &page(2)).is_some());
    }

    #[test]
    fn test_invalidate_pattern() {
        let mut store = store(10);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(PRODUCTS, json!(2), &QueryParams::new().with("q", "mug"), None);
        store.set("/store/products/prod_1", json!(3), &QueryParams::new(), None);
        store.set(REGIONS, json!(4), &QueryParams::new(), None);

        let removed = store.invalidate_pattern(&Regex::new("^/store/products").unwrap());

        assert_eq!(removed, 3);
        assert_eq!(store.len(), 1);
        assert!(store.get(REGIONS, &QueryParams::new()).is_some());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = store(10);

        store.set(PRODUCTS, json!(1), &page(1), None);
        store.set(REGIONS, json!(2), &QueryParams::new(), None);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.lru.counter(), 0);
        assert_eq!(store.get(REGIONS, &QueryParams::new()), None);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        store.set(PRODUCTS, json!({"products": []}), &page(1), Some(Duration::from_secs(60)));
        store.get(PRODUCTS, &page(1)); // hit
        store.get(REGIONS, &QueryParams::new()); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.max_entries, 100);
        assert_eq!(stats.hit_rate, 0.5);

        let entry = stats.entry(r#"/store/products:{"limit":"1"}"#).unwrap();
        assert_eq!(entry.ttl_ms, 60_000);
        assert_eq!(entry.size_bytes, r#"{"products":[]}"#.len());
    }

    #[test]
    fn test_stats_does_not_sweep() {
        let mut store = store(100);

        store.set(PRODUCTS, json!(1), &page(1), Some(Duration::from_millis(20)));
        sleep(Duration::from_millis(40));

        assert_eq!(store.stats().size, 1);
        assert!(!store.contains(PRODUCTS, &page(1)));
    }

    #[test]
    fn test_cleanup_expired() {
        let mut store = store(100);

        store.set(PRODUCTS, json!(1), &page(1), Some(Duration::from_millis(30)));
        store.set(PRODUCTS, json!(2), &page(2), Some(Duration::from_secs(10)));

        sleep(Duration::from_millis(50));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains(PRODUCTS, &page(2)));
    }
}
