//! Cache Entry Module
//!
//! Defines a single cached response with its storage time and TTL.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde_json::Value;

// == Cache Entry ==
/// A cached response payload with freshness metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response body
    pub payload: Value,
    /// Wall-clock time the entry was written, for introspection
    pub stored_at: DateTime<Utc>,
    /// Time to live from `created`
    pub ttl: Duration,
    /// Monotonic creation instant, used for freshness checks
    created: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored now with the given TTL.
    pub fn new(payload: Value, ttl: Duration) -> Self {
        Self {
            payload,
            stored_at: Utc::now(),
            ttl,
            created: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once its age reaches the TTL, so a zero TTL entry
    /// is never served.
    pub fn is_expired(&self) -> bool {
        self.age() >= self.ttl
    }

    /// Inverse of [`CacheEntry::is_expired`].
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }

    /// Length of the payload serialized as compact JSON.
    pub fn approximate_size(&self) -> usize {
        serde_json::to_vec(&self.payload)
            .map(|bytes| bytes.len())
            .unwrap_or(0)
    }
}
