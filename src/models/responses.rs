//! Response envelopes for the store API
//!
//! List endpoints wrap their items in a plural field next to paging counters;
//! detail endpoints wrap a single item in a singular field.

use serde::{Deserialize, Serialize};

use crate::models::{Product, Region};

/// Response body for `GET /store/products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Response body for `GET /store/products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Response body for `GET /store/regions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionListResponse {
    pub regions: Vec<Region>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Response body for `GET /store/regions/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionResponse {
    pub region: Region,
}

impl ProductListResponse {
    /// True when more products exist past this page.
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.products.len() as u64) < self.count
    }
}
