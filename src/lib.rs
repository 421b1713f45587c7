//! Storefront Cache - A read-through response cache for a multi-vendor store API
//!
//! Provides a typed store API client whose GET queries go through an
//! in-memory cache with TTL expiration, LRU eviction and pattern invalidation.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{CacheStats, CacheStore, SharedCache};
pub use client::{RequestOptions, StorefrontClient};
pub use config::{CacheConfig, ClientConfig};
pub use error::{ApiError, Result};
