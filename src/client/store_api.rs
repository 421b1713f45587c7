//! Typed store API queries
//!
//! Each method picks an endpoint and a filter shape and delegates to
//! [`StorefrontClient::cached_request`].

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::instrument;

use crate::client::StorefrontClient;
use crate::error::Result;
use crate::models::{
    ProductFilters, ProductListResponse, ProductParams, ProductResponse, RegionFilters,
    RegionListResponse, RegionParams, RegionResponse, StringOrList, ToQueryParams,
};

/// Product listing endpoint.
pub const PRODUCTS_ENDPOINT: &str = "/store/products";

/// Region listing endpoint.
pub const REGIONS_ENDPOINT: &str = "/store/regions";

/// Matches every cached product listing and product detail key.
static PRODUCT_KEYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^/store/products").expect("product key pattern is valid"));

impl StorefrontClient {
    // == Products ==
    /// Lists products matching `filters`.
    #[instrument(skip(self, filters), fields(endpoint = PRODUCTS_ENDPOINT))]
    pub async fn list_products(
        &self,
        filters: &ProductFilters,
        ttl: Option<Duration>,
    ) -> Result<ProductListResponse> {
        self.cached_request(PRODUCTS_ENDPOINT, &filters.to_query_params(), ttl)
            .await
    }

    /// Fetches a single product.
    #[instrument(skip(self, params))]
    pub async fn get_product(
        &self,
        id: &str,
        params: &ProductParams,
        ttl: Option<Duration>,
    ) -> Result<ProductResponse> {
        let endpoint = format!("{}/{}", PRODUCTS_ENDPOINT, id);
        self.cached_request(&endpoint, &params.to_query_params(), ttl)
            .await
    }

    /// Lists products matching a free-text query on top of `filters`.
    #[instrument(skip(self, filters))]
    pub async fn search_products(
        &self,
        query: &str,
        filters: &ProductFilters,
        ttl: Option<Duration>,
    ) -> Result<ProductListResponse> {
        let filters = ProductFilters {
            q: Some(query.to_string()),
            ..filters.clone()
        };
        self.list_products(&filters, ttl).await
    }

    /// Lists the products of one collection.
    #[instrument(skip(self, filters))]
    pub async fn get_products_by_collection(
        &self,
        collection_id: &str,
        filters: &ProductFilters,
        ttl: Option<Duration>,
    ) -> Result<ProductListResponse> {
        let filters = ProductFilters {
            collection_id: Some(StringOrList::from(collection_id)),
            ..filters.clone()
        };
        self.list_products(&filters, ttl).await
    }

    /// Lists the products of one category.
    #[instrument(skip(self, filters))]
    pub async fn get_products_by_category(
        &self,
        category_id: &str,
        filters: &ProductFilters,
        ttl: Option<Duration>,
    ) -> Result<ProductListResponse> {
        let filters = ProductFilters {
            category_id: Some(StringOrList::from(category_id)),
            ..filters.clone()
        };
        self.list_products(&filters, ttl).await
    }

    // == Regions ==
    #[instrument(skip(self, filters), fields(endpoint = REGIONS_ENDPOINT))]
    pub async fn list_regions(
        &self,
        filters: &RegionFilters,
        ttl: Option<Duration>,
    ) -> Result<RegionListResponse> {
        self.cached_request(REGIONS_ENDPOINT, &filters.to_query_params(), ttl)
            .await
    }

    #[instrument(skip(self, params))]
    pub async fn get_region(
        &self,
        id: &str,
        params: &RegionParams,
        ttl: Option<Duration>,
    ) -> Result<RegionResponse> {
        let endpoint = format!("{}/{}", REGIONS_ENDPOINT, id);
        self.cached_request(&endpoint, &params.to_query_params(), ttl)
            .await
    }

    // == Product Cache ==
    /// Drops every cached product listing and product detail.
    ///
    /// Call after a product mutation elsewhere in the system; the cache is
    /// keyed by request, so it cannot tell on its own which entries changed.
    pub async fn invalidate_product_cache(&self) -> usize {
        self.invalidate_cache_pattern(&PRODUCT_KEYS).await
    }
}
