//! Cache Module
//!
//! Provides the in-memory response cache with TTL expiration and LRU eviction.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use key::generate_key;
pub use lru::LruTracker;
pub use stats::{CacheMetrics, CacheStats, EntryStats};
pub use store::CacheStore;

// == Shared Cache ==
/// Handle to a store shared by every client clone that holds it.
///
/// Guards are only ever held for a single synchronous store operation, never
/// across a network call.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store in a [`SharedCache`] handle.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
