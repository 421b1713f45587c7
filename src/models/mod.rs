//! Store API models
//!
//! Query parameters and typed filters going out, resource models and
//! response envelopes coming back.

pub mod filters;
pub mod params;
pub mod product;
pub mod region;
pub mod responses;

// Re-export commonly used types
pub use filters::{DateRange, ProductFilters, ProductParams, RegionFilters, RegionParams, StringOrList};
pub use params::{ParamValue, QueryParams, ToQueryParams};
pub use product::{
    Metadata, Price, Product, ProductCategory, ProductCollection, ProductImage, ProductOption,
    ProductOptionValue, ProductTag, ProductType, ProductVariant,
};
pub use region::{Country, Provider, Region};
pub use responses::{ProductListResponse, ProductResponse, RegionListResponse, RegionResponse};
