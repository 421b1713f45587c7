//! Error types for the storefront client
//!
//! Every failure the client can produce, whether the transport broke or the
//! backend answered with an error status, is folded into [`ApiError`].

use serde::Deserialize;
use thiserror::Error;

// == Error Codes ==
/// Code reported for transport-level failures.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Code reported when a URL cannot be built from the base address and endpoint.
pub const INVALID_URL_CODE: &str = "INVALID_URL";

/// Code reported when a response body does not match the requested type.
pub const DECODE_ERROR_CODE: &str = "DECODE_ERROR";

/// Code reported for unusable client configuration.
pub const CONFIG_ERROR_CODE: &str = "CONFIG_ERROR";

// == API Error Enum ==
/// Unified error type for the storefront client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-success status
    #[error("Store API error: {message} ({code})")]
    Api {
        status: u16,
        code: String,
        message: String,
        kind: String,
    },

    /// Base URL or endpoint could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body did not deserialize into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    // == Code ==
    /// Machine-readable error code.
    ///
    /// Backend errors carry the backend's own code (or `HTTP_<status>` when the
    /// body could not be parsed); client-side failures use fixed codes.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Network { .. } => NETWORK_ERROR_CODE,
            ApiError::Api { code, .. } => code,
            ApiError::InvalidUrl(_) => INVALID_URL_CODE,
            ApiError::Decode(_) => DECODE_ERROR_CODE,
            ApiError::Config(_) => CONFIG_ERROR_CODE,
        }
    }

    // == Message ==
    /// Human-readable description, without the code suffix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message } => message,
            ApiError::Api { message, .. } => message,
            ApiError::InvalidUrl(message)
            | ApiError::Decode(message)
            | ApiError::Config(message) => message,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds an application error from a status and an optional parsed body.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: Option<ErrorBody>) -> Self {
        match body {
            Some(body) => ApiError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
                kind: body.kind,
            },
            None => ApiError::Api {
                status: status.as_u16(),
                code: format!("HTTP_{}", status.as_u16()),
                message: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
                kind: "api_error".to_string(),
            },
        }
    }
}

// == Conversions ==
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        ApiError::Network {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

// == Backend Error Body ==
/// Structured error body returned by the store API.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(rename = "type", default = "default_error_kind")]
    pub kind: String,
}

fn default_error_kind() -> String {
    "api_error".to_string()
}

// == Result Type Alias ==
/// Convenience Result type for the storefront client.
pub type Result<T> = std::result::Result<T, ApiError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_structured_body_keeps_backend_code() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"code":"not_found","message":"Product was not found","type":"not_found"}"#,
        )
        .unwrap();
        let err = ApiError::from_response(StatusCode::NOT_FOUND, Some(body));

        assert_eq!(err.code(), "not_found");
        assert_eq!(err.message(), "Product was not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Store API error: Product was not found (not_found)"
        );
    }

    #[test]
    fn test_missing_body_synthesizes_http_code() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, None);

        assert_eq!(err.code(), "HTTP_502");
        assert_eq!(err.message(), "Bad Gateway");
        match err {
            ApiError::Api { kind, .. } => assert_eq!(kind, "api_error"),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_body_type_defaults() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"invalid_data","message":"bad limit"}"#).unwrap();
        assert_eq!(body.kind, "api_error");
    }

    #[test]
    fn test_client_side_codes() {
        assert_eq!(
            ApiError::Network { message: "refused".into() }.code(),
            NETWORK_ERROR_CODE
        );
        assert_eq!(ApiError::Decode("eof".into()).code(), DECODE_ERROR_CODE);
        assert_eq!(ApiError::InvalidUrl("x".into()).code(), INVALID_URL_CODE);
        assert_eq!(ApiError::Config("x".into()).status(), None);
    }
}
