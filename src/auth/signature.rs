//! HMAC-SHA384 signature generation for Bitfinex API authentication.
//!
//! Bitfinex authenticated endpoints require a signature computed as:
//! ```text
//! HMAC-SHA384("/api/v2/" + endpoint + nonce + body, api_secret)
//! ```
//!
//! The digest is hex-encoded (lowercase) and sent in the `bfx-signature`
//! header alongside `bfx-apikey` and `bfx-nonce`.

use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use sha2::Sha384;

use crate::auth::Credentials;
use crate::error::BitfinexError;
use crate::rest::endpoints::API_PATH_PREFIX;

type HmacSha384 = Hmac<Sha384>;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "bfx-apikey";
/// Header carrying the nonce.
pub const NONCE_HEADER: &str = "bfx-nonce";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "bfx-signature";

/// The authentication headers for a single request.
///
/// Derived from the credentials, endpoint, body and nonce at send time and
/// never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Value for `bfx-apikey`
    pub api_key: String,
    /// Value for `bfx-nonce`, decimal
    pub nonce: String,
    /// Value for `bfx-signature`, lowercase hex
    pub signature: String,
}

impl AuthHeaders {
    /// Convert into a header map ready to attach to a request.
    pub fn to_header_map(&self) -> Result<HeaderMap, BitfinexError> {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, header_value(&self.api_key)?);
        headers.insert(NONCE_HEADER, header_value(&self.nonce)?);
        headers.insert(SIGNATURE_HEADER, header_value(&self.signature)?);
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, BitfinexError> {
    HeaderValue::from_str(value)
        .map_err(|e| BitfinexError::Auth(format!("Invalid header value: {e}")))
}

/// Build the exact string that gets signed.
///
/// An absent or empty body contributes nothing.
pub fn signing_payload(endpoint: &str, nonce: u64, body: Option<&str>) -> String {
    format!(
        "{}{}{}{}",
        API_PATH_PREFIX,
        endpoint,
        nonce,
        body.unwrap_or_default()
    )
}

/// Sign a request for Bitfinex's authenticated API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `endpoint` - The API-relative path without leading slash (e.g., "auth/r/orders")
/// * `nonce` - The nonce value for this request
/// * `body` - The serialized JSON body, exactly as it will be sent
///
/// # Example
///
/// ```rust
/// use bitfinex_cli::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("K", "S");
/// let headers = sign_request(&credentials, "auth/r/orders", 1700000000000, None)?;
/// assert_eq!(headers.nonce, "1700000000000");
/// assert_eq!(headers.signature.len(), 96);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    endpoint: &str,
    nonce: u64,
    body: Option<&str>,
) -> Result<AuthHeaders, BitfinexError> {
    let message = signing_payload(endpoint, nonce, body);

    let mut hmac = HmacSha384::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| BitfinexError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message.as_bytes());
    let digest = hmac.finalize().into_bytes();

    Ok(AuthHeaders {
        api_key: credentials.api_key.clone(),
        nonce: nonce.to_string(),
        signature: hex::encode(digest),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED_NONCE: u64 = 1_700_000_000_000;

    #[test]
    fn test_signing_payload_without_body() {
        assert_eq!(
            signing_payload("auth/r/orders", FIXED_NONCE, None),
            "/api/v2/auth/r/orders1700000000000"
        );
        assert_eq!(
            signing_payload("auth/r/positions", FIXED_NONCE, Some("")),
            "/api/v2/auth/r/positions1700000000000"
        );
    }

    #[test]
    fn test_signing_payload_appends_body() {
        assert_eq!(
            signing_payload("auth/w/order/cancel", 5, Some(r#"{"id":1}"#)),
            r#"/api/v2/auth/w/order/cancel5{"id":1}"#
        );
    }

    #[test]
    fn test_known_signature() {
        let credentials = Credentials::new("K", "S");
        let headers = sign_request(&credentials, "auth/r/orders", FIXED_NONCE, None).unwrap();

        assert_eq!(headers.api_key, "K");
        assert_eq!(headers.nonce, "1700000000000");
        assert_eq!(
            headers.signature,
            "ff3c189e4f137a5dfeb1efd45e67d97d20a11ea2d9250da8bb5fc134903733bc\
             37fd2af333aa798300b5f0e68ea6499d"
        );
    }

    #[test]
    fn test_known_signature_positions() {
        let credentials = Credentials::new("K", "S");
        let headers = sign_request(&credentials, "auth/r/positions", FIXED_NONCE, None).unwrap();
        assert_eq!(
            headers.signature,
            "b3ee11feb1b4bf591bcc76555037521a49e32cfcf932172b58b1c7372f233c2a\
             9d6468be4f99c7db7e7536262afdaa2a"
        );
    }

    #[test]
    fn test_signature_format() {
        let credentials = Credentials::new("key", "secret");
        let headers =
            sign_request(&credentials, "auth/w/order/cancel", 42, Some(r#"{"id":7}"#)).unwrap();

        // SHA-384 is 48 bytes, 96 hex characters.
        assert_eq!(headers.signature.len(), 96);
        assert!(
            headers
                .signature
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_signature_consistency() {
        let credentials = Credentials::new("key", "my_secret");
        let body = Some(r#"{"id":12345}"#);

        let sig1 = sign_request(&credentials, "auth/w/order/cancel", 12345, body).unwrap();
        let sig2 = sign_request(&credentials, "auth/w/order/cancel", 12345, body).unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_nonce() {
        let credentials = Credentials::new("key", "my_secret");

        let sig1 = sign_request(&credentials, "auth/r/orders", 12345, None).unwrap();
        let sig2 = sign_request(&credentials, "auth/r/orders", 12346, None).unwrap();

        assert_ne!(sig1.signature, sig2.signature);
    }

    #[test]
    fn test_signature_changes_with_body() {
        let credentials = Credentials::new("key", "my_secret");

        let sig1 =
            sign_request(&credentials, "auth/w/order/cancel", 1, Some(r#"{"id":1}"#)).unwrap();
        let sig2 =
            sign_request(&credentials, "auth/w/order/cancel", 1, Some(r#"{"id":2}"#)).unwrap();

        assert_ne!(sig1.signature, sig2.signature);
    }

    #[test]
    fn test_header_map() {
        let credentials = Credentials::new("K", "S");
        let headers = sign_request(&credentials, "auth/r/orders", FIXED_NONCE, None)
            .unwrap()
            .to_header_map()
            .unwrap();

        assert_eq!(headers[API_KEY_HEADER], "K");
        assert_eq!(headers[NONCE_HEADER], "1700000000000");
        assert_eq!(headers[SIGNATURE_HEADER].len(), 96);
    }
}
