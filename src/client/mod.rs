//! Client Module
//!
//! Store API client with a read-through response cache.
//!
//! # Endpoints
//! - `GET /store/products` - `list_products`, `search_products`, category/collection variants
//! - `GET /store/products/{id}` - `get_product`
//! - `GET /store/regions` - `list_regions`
//! - `GET /store/regions/{id}` - `get_region`

mod facade;
mod store_api;
pub mod url;

pub use facade::{RequestOptions, StorefrontClient, PUBLISHABLE_KEY_HEADER, SELLER_ID_HEADER};
pub use store_api::{PRODUCTS_ENDPOINT, REGIONS_ENDPOINT};
pub use url::build_url;
