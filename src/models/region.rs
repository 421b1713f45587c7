//! Region models returned by the store API

use serde::{Deserialize, Serialize};

use crate::models::product::Metadata;

/// A sales region with its currency and tax setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub currency_code: String,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub tax_code: Option<String>,
    #[serde(default)]
    pub gift_cards_taxable: bool,
    #[serde(default)]
    pub automatic_taxes: bool,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub payment_providers: Vec<Provider>,
    #[serde(default)]
    pub fulfillment_providers: Vec<Provider>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default)]
    pub id: Option<String>,
    pub iso_2: String,
    #[serde(default)]
    pub iso_3: Option<String>,
    #[serde(default)]
    pub num_code: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
}

/// Payment or fulfillment provider enabled in a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Region {
    /// Whether the region ships to the given ISO 3166-1 alpha-2 country.
    pub fn serves_country(&self, iso_2: &str) -> bool {
        self.countries
            .iter()
            .any(|country| country.iso_2.eq_ignore_ascii_case(iso_2))
    }
}
