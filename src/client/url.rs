//! Request URL construction
//!
//! Scalars encode as `key=value`, lists as one `key=value` pair per element,
//! and ranges as `key[op]=value` per bound.

use reqwest::Url;

use crate::error::{ApiError, Result};
use crate::models::{ParamValue, QueryParams};

/// Joins `endpoint` onto `base` and appends `params` as the query string.
pub fn build_url(base: &Url, endpoint: &str, params: &QueryParams) -> Result<Url> {
    let mut url = base
        .join(endpoint)
        .map_err(|err| ApiError::InvalidUrl(format!("{} joined with {}: {}", base, endpoint, err)))?;

    if params.is_empty() {
        return Ok(url);
    }

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.iter() {
            match value {
                ParamValue::Scalar(value) => {
                    query.append_pair(key, value);
                }
                ParamValue::List(values) => {
                    for value in values {
                        query.append_pair(key, value);
                    }
                }
                ParamValue::Range(bounds) => {
                    for (op, value) in bounds {
                        query.append_pair(&format!("{}[{}]", key, op), value);
                    }
                }
            }
        }
    }

    // An all-empty parameter set would leave a dangling `?`
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}

/// Parses the configured base address.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url).map_err(|err| ApiError::InvalidUrl(format!("{}: {}", base_url, err)))
}
