//! Typed filters for the store API
//!
//! Each struct mirrors the query contract of one endpoint family and lowers
//! into [`QueryParams`], dropping fields that were left unset.

use std::collections::BTreeMap;

use crate::models::params::{ParamValue, QueryParams, ToQueryParams};

// == String Or List ==
/// A filter that accepts either one identifier or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for StringOrList {
    fn from(value: &str) -> Self {
        StringOrList::One(value.to_string())
    }
}

impl From<String> for StringOrList {
    fn from(value: String) -> Self {
        StringOrList::One(value)
    }
}

impl From<Vec<String>> for StringOrList {
    fn from(values: Vec<String>) -> Self {
        StringOrList::Many(values)
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(values: Vec<&str>) -> Self {
        StringOrList::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&StringOrList> for ParamValue {
    fn from(value: &StringOrList) -> Self {
        match value {
            StringOrList::One(value) => ParamValue::Scalar(value.clone()),
            StringOrList::Many(values) => ParamValue::List(values.clone()),
        }
    }
}

// == Date Range ==
/// Comparison bounds for timestamp filters such as `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub lt: Option<String>,
    pub gt: Option<String>,
    pub lte: Option<String>,
    pub gte: Option<String>,
}

impl DateRange {
    pub fn after(value: impl Into<String>) -> Self {
        Self {
            gt: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn before(value: impl Into<String>) -> Self {
        Self {
            lt: Some(value.into()),
            ..Self::default()
        }
    }

    /// Range value with unset bounds removed, or `None` if no bound is set.
    fn to_param(&self) -> Option<ParamValue> {
        let bounds: BTreeMap<String, String> = [
            ("lt", &self.lt),
            ("gt", &self.gt),
            ("lte", &self.lte),
            ("gte", &self.gte),
        ]
        .into_iter()
        .filter_map(|(op, bound)| bound.as_ref().map(|b| (op.to_string(), b.clone())))
        .collect();

        if bounds.is_empty() {
            None
        } else {
            Some(ParamValue::Range(bounds))
        }
    }
}

// == Product Filters ==
/// Filters accepted by `GET /store/products`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub q: Option<String>,
    pub id: Option<StringOrList>,
    pub collection_id: Option<StringOrList>,
    pub category_id: Option<StringOrList>,
    pub type_id: Option<StringOrList>,
    pub tag: Option<StringOrList>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub handle: Option<String>,
    pub is_giftcard: Option<bool>,
    pub created_at: Option<DateRange>,
    pub updated_at: Option<DateRange>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<String>,
    pub fields: Option<String>,
    pub currency_code: Option<String>,
    pub region_id: Option<String>,
}

impl ProductFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn category(mut self, category_id: impl Into<StringOrList>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn collection(mut self, collection_id: impl Into<StringOrList>) -> Self {
        self.collection_id = Some(collection_id.into());
        self
    }

    pub fn created(mut self, range: DateRange) -> Self {
        self.created_at = Some(range);
        self
    }

    pub fn region(mut self, region_id: impl Into<String>) -> Self {
        self.region_id = Some(region_id.into());
        self
    }
}

impl ToQueryParams for ProductFilters {
    fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("q", self.q.as_ref());
        params.insert_opt("id", self.id.as_ref());
        params.insert_opt("collection_id", self.collection_id.as_ref());
        params.insert_opt("category_id", self.category_id.as_ref());
        params.insert_opt("type_id", self.type_id.as_ref());
        params.insert_opt("tag", self.tag.as_ref());
        params.insert_opt("title", self.title.as_ref());
        params.insert_opt("description", self.description.as_ref());
        params.insert_opt("handle", self.handle.as_ref());
        params.insert_opt("is_giftcard", self.is_giftcard);
        params.insert_opt("created_at", self.created_at.as_ref().and_then(DateRange::to_param));
        params.insert_opt("updated_at", self.updated_at.as_ref().and_then(DateRange::to_param));
        params.insert_opt("offset", self.offset);
        params.insert_opt("limit", self.limit);
        params.insert_opt("order", self.order.as_ref());
        params.insert_opt("fields", self.fields.as_ref());
        params.insert_opt("currency_code", self.currency_code.as_ref());
        params.insert_opt("region_id", self.region_id.as_ref());
        params
    }
}

// == Product Params ==
/// Parameters accepted by `GET /store/products/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductParams {
    pub fields: Option<String>,
    pub expand: Option<String>,
    pub currency_code: Option<String>,
    pub region_id: Option<String>,
}

impl ToQueryParams for ProductParams {
    fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("fields", self.fields.as_ref());
        params.insert_opt("expand", self.expand.as_ref());
        params.insert_opt("currency_code", self.currency_code.as_ref());
        params.insert_opt("region_id", self.region_id.as_ref());
        params
    }
}

// == Region Filters ==
/// Filters accepted by `GET /store/regions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFilters {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub fields: Option<String>,
    pub expand: Option<String>,
}

impl ToQueryParams for RegionFilters {
    fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("offset", self.offset);
        params.insert_opt("limit", self.limit);
        params.insert_opt("fields", self.fields.as_ref());
        params.insert_opt("expand", self.expand.as_ref());
        params
    }
}

// == Region Params ==
/// Parameters accepted by `GET /store/regions/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionParams {
    pub fields: Option<String>,
    pub expand: Option<String>,
}

impl ToQueryParams for RegionParams {
    fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("fields", self.fields.as_ref());
        params.insert_opt("expand", self.expand.as_ref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_are_empty() {
        assert!(ProductFilters::default().to_query_params().is_empty());
        assert!(RegionFilters::default().to_query_params().is_empty());
        assert!(ProductParams::default().to_query_params().is_empty());
        assert!(RegionParams::default().to_query_params().is_empty());
    }

    #[test]
    fn test_product_filters_lowering() {
        let params = ProductFilters::new()
            .limit(12)
            .category(vec!["pcat_a", "pcat_b"])
            .collection("pcol_1")
            .created(DateRange::after("2024-01-01"))
            .to_query_params();

        assert_eq!(params.get("limit"), Some(&ParamValue::Scalar("12".into())));
        assert_eq!(
            params.get("category_id"),
            Some(&ParamValue::List(vec!["pcat_a".into(), "pcat_b".into()]))
        );
        assert_eq!(
            params.get("collection_id"),
            Some(&ParamValue::Scalar("pcol_1".into()))
        );

        let mut expected = BTreeMap::new();
        expected.insert("gt".to_string(), "2024-01-01".to_string());
        assert_eq!(params.get("created_at"), Some(&ParamValue::Range(expected)));
    }

    #[test]
    fn test_empty_date_range_is_dropped() {
        let params = ProductFilters::new()
            .created(DateRange::default())
            .to_query_params();
        assert!(params.get("created_at").is_none());
    }

    #[test]
    fn test_giftcard_flag_is_scalar() {
        let filters = ProductFilters {
            is_giftcard: Some(false),
            ..ProductFilters::default()
        };
        assert_eq!(
            filters.to_query_params().get("is_giftcard"),
            Some(&ParamValue::Scalar("false".into()))
        );
    }
}
