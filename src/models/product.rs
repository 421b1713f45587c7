//! Product models returned by the store API

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form metadata attached to most store resources.
pub type Metadata = HashMap<String, Value>;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub tags: Vec<ProductTag>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub collection: Option<ProductCollection>,
    #[serde(default)]
    pub categories: Vec<ProductCategory>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub variant_rank: Option<i64>,
    #[serde(default)]
    pub inventory_quantity: i64,
    #[serde(default)]
    pub allow_backorder: bool,
    #[serde(default)]
    pub manage_inventory: bool,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub prices: Vec<Price>,
    #[serde(default)]
    pub options: Vec<ProductOptionValue>,
    #[serde(default)]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    pub currency_code: String,
    /// Amount in the currency's smallest unit
    pub amount: i64,
    #[serde(default)]
    pub min_quantity: Option<i64>,
    #[serde(default)]
    pub max_quantity: Option<i64>,
    #[serde(default)]
    pub price_set_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub values: Vec<ProductOptionValue>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOptionValue {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default)]
    pub variant_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTag {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCollection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub parent_category_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl Product {
    /// Lowest price across all variants in the given currency.
    pub fn cheapest_price(&self, currency_code: &str) -> Option<i64> {
        self.variants
            .iter()
            .flat_map(|variant| variant.prices.iter())
            .filter(|price| price.currency_code.eq_ignore_ascii_case(currency_code))
            .map(|price| price.amount)
            .min()
    }
}
