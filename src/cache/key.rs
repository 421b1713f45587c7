//! Cache key derivation
//!
//! A key is the endpoint path, followed by the canonical JSON of its
//! parameters when there are any.

use crate::models::QueryParams;

// == Generate Key ==
/// Derives the cache key for a request.
///
/// Parameters are held in name order and absent values never enter
/// [`QueryParams`], so two filter sets with the same pairs always serialize to
/// the same string regardless of how they were built.
pub fn generate_key(endpoint: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    match serde_json::to_string(params) {
        Ok(json) => format!("{}:{}", endpoint, json),
        // Only string maps are serialized here, so this arm is unreachable in practice
        Err(_) => format!("{}:{:?}", endpoint, params),
    }
}
