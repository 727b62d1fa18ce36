//! Error types for the Bitfinex client.

use serde_json::Value;
use thiserror::Error;

/// The main error type for all Bitfinex client operations.
///
/// Only failures that prevent a response from being obtained are represented
/// here. A response body that is not JSON is recovered inside
/// [`BitfinexRestClient::send`](crate::rest::BitfinexRestClient::send), and
/// business-level rejections from the exchange are returned verbatim.
#[derive(Error, Debug)]
pub enum BitfinexError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for authenticated endpoints")]
    MissingCredentials,
}

impl BitfinexError {
    /// Whether this error came from the network layer (connection, DNS, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, BitfinexError::Http(_) | BitfinexError::HttpMiddleware(_))
    }

    /// Whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            BitfinexError::Http(e) => e.is_timeout(),
            BitfinexError::HttpMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            _ => false,
        }
    }
}

/// A business-level error reported by the exchange in a response body.
///
/// Bitfinex encodes these as `["error", <code>, "<message>"]`. The client never
/// converts them into a [`BitfinexError`]; this type only helps callers inspect
/// a returned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Numeric error code
    pub code: i64,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Recognise the exchange's error array in a response value.
    ///
    /// Returns `None` for anything that is not `["error", code, message, ...]`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.first()?.as_str()? != "error" {
            return None;
        }
        let code = items.get(1)?.as_i64()?;
        let message = items.get(2).and_then(Value::as_str).unwrap_or_default();
        Some(Self::new(code, message))
    }

    /// Check if this is a nonce rejection.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == error_codes::NONCE_SMALL || self.message.starts_with("nonce:")
    }

    /// Check if this is an invalid key or signature error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == error_codes::INVALID_KEY || self.message.starts_with("apikey:")
    }
}

/// Known Bitfinex error codes.
pub mod error_codes {
    pub const INVALID_KEY: i64 = 10100;
    pub const NONCE_SMALL: i64 = 10114;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_from_value() {
        let value = json!(["error", 10114, "nonce: small"]);
        let error = ApiError::from_value(&value).unwrap();
        assert_eq!(error.code, 10114);
        assert_eq!(error.message, "nonce: small");
        assert!(error.is_invalid_nonce());
        assert!(!error.is_invalid_key());
    }

    #[test]
    fn test_api_error_ignores_regular_payloads() {
        assert!(ApiError::from_value(&json!([[1, 2, 3]])).is_none());
        assert!(ApiError::from_value(&json!({"error": "Failed to decode JSON response"})).is_none());
        assert!(ApiError::from_value(&json!([])).is_none());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(10100, "apikey: invalid");
        assert_eq!(error.to_string(), "10100: apikey: invalid");
        assert!(error.is_invalid_key());
    }

    #[test]
    fn test_non_transport_errors() {
        assert!(!BitfinexError::MissingCredentials.is_transport());
        assert!(!BitfinexError::Auth("bad".into()).is_timeout());
    }
}
