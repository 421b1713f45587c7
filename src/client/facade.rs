//! Storefront API client
//!
//! Wraps a reqwest client with the storefront's default headers, error
//! normalization and a read-through response cache.

use std::time::Duration;

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{self, CacheStats, CacheStore, SharedCache};
use crate::client::url::{build_url, parse_base_url};
use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorBody, Result};
use crate::models::QueryParams;

/// Header carrying the publishable API key.
pub const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Header scoping requests to one seller's catalog.
pub const SELLER_ID_HEADER: &str = "seller_id";

// == Request Options ==
/// Per-call overrides for [`StorefrontClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, GET by default
    pub method: Method,
    /// Headers merged over the client defaults; these win on conflict
    pub headers: HeaderMap,
    /// Optional JSON request body
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// == Storefront Client ==
/// Store API client with a read-through response cache.
///
/// Clones share the same HTTP connection pool and the same cache.
#[derive(Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    cache: SharedCache,
}

impl StorefrontClient {
    // == Constructors ==
    /// Creates a client with its own cache sized by `config.cache`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let cache = cache::shared(CacheStore::from_config(&config.cache));
        Self::with_cache(config, cache)
    }

    /// Creates a client backed by an existing cache handle.
    ///
    /// `config.cache` is ignored; the handle's own capacity and TTL apply.
    pub fn with_cache(config: ClientConfig, cache: SharedCache) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let default_headers = build_headers(&config)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("Failed to build HTTP client: {}", err)))?;

        info!(
            base_url = %base_url,
            seller_scoped = config.seller_id.is_some(),
            "storefront client initialized"
        );

        Ok(Self {
            http,
            base_url,
            default_headers,
            cache,
        })
    }

    /// Creates a client from `ClientConfig::from_env()`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers attached to every request.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// The cache handle, for sharing with another client.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Builds the full request URL for an endpoint and its parameters.
    pub fn build_url(&self, endpoint: &str, params: &QueryParams) -> Result<Url> {
        build_url(&self.base_url, endpoint, params)
    }

    // == Request ==
    /// Performs a request and decodes the JSON response.
    ///
    /// Non-success statuses become [`ApiError::Api`], using the backend's
    /// `{code, message, type}` body when it parses and a `HTTP_<status>`
    /// fallback otherwise. Transport failures become [`ApiError::Network`].
    /// Nothing is retried.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.build_url(endpoint, params)?;
        let headers = merge_headers(&self.default_headers, &options.headers);
        let method = options.method;

        debug!(%method, %url, "sending store API request");

        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(%method, %url, error = %err, "store API request failed");
            ApiError::Network {
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.ok();
            let err = ApiError::from_response(status, body);
            warn!(%method, %url, %status, code = err.code(), "store API returned an error");
            return Err(err);
        }

        debug!(%method, %url, %status, "received store API response");
        Ok(response.json::<T>().await?)
    }

    // == Cached Request ==
    /// GETs an endpoint through the cache.
    ///
    /// A fresh cached payload is returned without touching the network. On a
    /// miss the response is fetched, decoded, and only then stored, so error
    /// responses and undecodable bodies are never cached.
    pub async fn cached_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
        ttl: Option<Duration>,
    ) -> Result<T> {
        let cached = self.cache.write().await.get(endpoint, params);
        if let Some(payload) = cached {
            return Ok(serde_json::from_value(payload)?);
        }

        let payload: Value = self.request(endpoint, params, RequestOptions::get()).await?;
        let decoded = serde_json::from_value(payload.clone())?;

        self.cache.write().await.set(endpoint, payload, params, ttl);
        Ok(decoded)
    }

    // == Cache Management ==
    /// Drops the cached response for one exact request.
    pub async fn invalidate_cache(&self, endpoint: &str, params: &QueryParams) -> bool {
        self.cache.write().await.invalidate(endpoint, params)
    }

    /// Drops every cached response whose key matches `pattern`.
    pub async fn invalidate_cache_pattern(&self, pattern: &Regex) -> usize {
        let removed = self.cache.write().await.invalidate_pattern(pattern);
        info!(pattern = %pattern, removed, "invalidated cached responses");
        removed
    }

    /// Drops every cached response.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        info!("cleared response cache");
    }

    /// Snapshot of the cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}

// == Headers ==
/// Default headers derived from configuration.
fn build_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if !config.publishable_key.is_empty() {
        headers.insert(
            HeaderName::from_static(PUBLISHABLE_KEY_HEADER),
            header_value(&config.publishable_key, "publishable key")?,
        );
    }

    if let Some(seller_id) = config.seller_id.as_deref().filter(|id| !id.is_empty()) {
        headers.insert(
            HeaderName::from_static(SELLER_ID_HEADER),
            header_value(seller_id, "seller id")?,
        );
    }

    Ok(headers)
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ApiError::Config(format!("{} is not a valid header value", what)))
}

/// Defaults overlaid with `overrides`; an overridden name keeps only the override's values.
fn merge_headers(defaults: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();
    for name in overrides.keys() {
        merged.remove(name);
        for value in overrides.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }
    merged
}
