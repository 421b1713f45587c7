//! Configuration Module
//!
//! Client and cache settings, loadable from environment variables.

use std::env;
use std::time::Duration;

/// Default entry lifetime: five minutes.
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default store capacity.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

// == Cache Config ==
/// Cache tuning parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied when a call does not pass its own
    pub default_ttl: Duration,
    /// Maximum number of entries the store can hold
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_millis(DEFAULT_TTL_MS),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

// == Client Config ==
/// Storefront client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base address, e.g. `https://api.example.com`
    pub base_url: String,
    /// Publishable API key sent on every request
    pub publishable_key: String,
    /// Seller scoping for multi-vendor catalogs
    pub seller_id: Option<String>,
    /// Per-request timeout enforced by the HTTP client
    pub timeout: Duration,
    pub cache: CacheConfig,
}

impl ClientConfig {
    /// Creates a config with default timeout and cache settings.
    pub fn new(base_url: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            publishable_key: publishable_key.into(),
            ..Self::default()
        }
    }

    pub fn with_seller(mut self, seller_id: impl Into<String>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }

    pub fn with_cache(mut self, default_ttl: Duration, max_entries: usize) -> Self {
        self.cache = CacheConfig {
            default_ttl,
            max_entries,
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEDUSA_BACKEND_URL` - Backend base address (default: http://localhost:9000)
    /// - `MEDUSA_PUBLISHABLE_KEY` - Publishable API key (default: empty)
    /// - `MOTIHARU_SELLER_ID` - Seller scoping header value (default: unset)
    /// - `REQUEST_TIMEOUT_MS` - Request timeout in milliseconds (default: 30000)
    /// - `CACHE_DEFAULT_TTL_MS` - Default entry TTL in milliseconds (default: 300000)
    /// - `CACHE_MAX_ENTRIES` - Store capacity (default: 100)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("MEDUSA_BACKEND_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            publishable_key: env::var("MEDUSA_PUBLISHABLE_KEY").unwrap_or_default(),
            seller_id: env::var("MOTIHARU_SELLER_ID").ok().filter(|v| !v.is_empty()),
            timeout: Duration::from_millis(
                env::var("REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
            cache: CacheConfig {
                default_ttl: Duration::from_millis(
                    env::var("CACHE_DEFAULT_TTL_MS")
                        .ok()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(DEFAULT_TTL_MS),
                ),
                max_entries: env::var("CACHE_MAX_ENTRIES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_ENTRIES),
            },
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            publishable_key: String::new(),
            seller_id: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            cache: CacheConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert!(config.publishable_key.is_empty());
        assert!(config.seller_id.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.cache.default_ttl, Duration::from_secs(300));
        assert_eq!(config.cache.max_entries, 100);
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new("https://shop.example.com", "pk_123")
            .with_seller("sel_42")
            .with_cache(Duration::from_millis(100), 2)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.publishable_key, "pk_123");
        assert_eq!(config.seller_id.as_deref(), Some("sel_42"));
        assert_eq!(config.cache.max_entries, 2);
        assert_eq!(config.cache.default_ttl, Duration::from_millis(100));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_env() {
        // Only test that mutates the process environment
        env::remove_var("MEDUSA_BACKEND_URL");
        env::remove_var("MEDUSA_PUBLISHABLE_KEY");
        env::remove_var("MOTIHARU_SELLER_ID");
        env::remove_var("REQUEST_TIMEOUT_MS");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::set_var("CACHE_DEFAULT_TTL_MS", "not-a-number");

        let config = ClientConfig::from_env();
        assert_eq!(config, ClientConfig::default());

        env::set_var("MEDUSA_BACKEND_URL", "https://api.shop.test");
        env::set_var("MOTIHARU_SELLER_ID", "sel_7");
        env::set_var("CACHE_DEFAULT_TTL_MS", "1500");
        env::set_var("CACHE_MAX_ENTRIES", "8");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "https://api.shop.test");
        assert_eq!(config.seller_id.as_deref(), Some("sel_7"));
        assert_eq!(config.cache.default_ttl, Duration::from_millis(1500));
        assert_eq!(config.cache.max_entries, 8);

        env::remove_var("MEDUSA_BACKEND_URL");
        env::remove_var("MOTIHARU_SELLER_ID");
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_MAX_ENTRIES");
    }
}
