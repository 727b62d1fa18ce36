//! Bitfinex authenticated REST client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, sign_request};
use crate::error::BitfinexError;
use crate::rest::endpoints::BITFINEX_BASE_URL;
use crate::rest::traits::BitfinexClient;
use crate::rest::types::{CancelOrderRequest, ModifyOrderRequest, PlaceOrderRequest};

/// Message placed in the sentinel value returned for undecodable bodies.
pub const DECODE_ERROR_MESSAGE: &str = "Failed to decode JSON response";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The Bitfinex authenticated REST client.
///
/// Every call is a single signed POST; nothing is retried or cached.
///
/// # Example
///
/// ```rust,no_run
/// use bitfinex_cli::auth::StaticCredentials;
/// use bitfinex_cli::rest::BitfinexRestClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret"));
///     let client = BitfinexRestClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     let orders = client.list_orders().await?;
///     println!("{orders}");
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitfinexRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl BitfinexRestClient {
    /// Create a new client builder.
    pub fn builder() -> BitfinexRestClientBuilder {
        BitfinexRestClientBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated POST request and return the decoded response.
    ///
    /// `payload` is serialized once; the same bytes are signed and sent.
    ///
    /// - Transport failures are returned as errors.
    /// - A body that is not JSON yields `{"error": "Failed to decode JSON response"}`.
    /// - Any JSON body, including exchange error arrays, is returned as is.
    pub async fn send<P>(&self, endpoint: &str, payload: Option<&P>) -> Result<Value, BitfinexError>
    where
        P: Serialize + ?Sized,
    {
        let body = payload.map(serde_json::to_string).transpose()?;
        self.send_raw(endpoint, body).await
    }

    /// Make an authenticated POST request with a pre-serialized JSON body.
    pub async fn send_raw(
        &self,
        endpoint: &str,
        body: Option<String>,
    ) -> Result<Value, BitfinexError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(BitfinexError::MissingCredentials)?;
        let creds = credentials.get_credentials();

        let nonce = self.nonce_provider.next_nonce();
        let auth = sign_request(creds, endpoint, nonce, body.as_deref())?;

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        debug!(endpoint, nonce, has_body = body.is_some(), "sending signed request");

        let mut request = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .headers(auth.to_header_map()?);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        self.parse_response(endpoint, response).await
    }

    async fn parse_response(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<Value, BitfinexError> {
        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint, %status, bytes = body.len(), "received response");

        if !status.is_success() {
            warn!(endpoint, %status, "exchange returned non-success status");
        }

        Ok(decode_response_body(&body))
    }
}

/// Decode a response body, substituting the sentinel error object when the
/// body is not valid JSON.
pub fn decode_response_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(error = %e, "response body is not valid JSON");
        serde_json::json!({ "error": DECODE_ERROR_MESSAGE })
    })
}

impl std::fmt::Debug for BitfinexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitfinexRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`BitfinexRestClient`].
pub struct BitfinexRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
}

impl BitfinexRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: BITFINEX_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Clients sharing one API key should share one provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the overall per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// Fails if the underlying HTTP client cannot be constructed with the
    /// configured timeout.
    pub fn build(self) -> Result<BitfinexRestClient, BitfinexError> {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("bitfinex-cli/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("bitfinex-cli"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(BitfinexRestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            nonce_provider,
        })
    }
}

impl Default for BitfinexRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BitfinexClient for BitfinexRestClient {
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Value, BitfinexError> {
        BitfinexRestClient::place_order(self, request).await
    }

    async fn modify_order(&self, request: &ModifyOrderRequest) -> Result<Value, BitfinexError> {
        BitfinexRestClient::modify_order(self, request).await
    }

    async fn cancel_order(&self, request: &CancelOrderRequest) -> Result<Value, BitfinexError> {
        BitfinexRestClient::cancel_order(self, request).await
    }

    async fn list_orders(&self) -> Result<Value, BitfinexError> {
        BitfinexRestClient::list_orders(self).await
    }

    async fn list_positions(&self) -> Result<Value, BitfinexError> {
        BitfinexRestClient::list_positions(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_json() {
        assert_eq!(decode_response_body(r#"[[1,"a"]]"#), json!([[1, "a"]]));
        assert_eq!(decode_response_body(r#"{"ok":true}"#), json!({"ok": true}));
    }

    #[test]
    fn test_decode_invalid_json() {
        let expected = json!({ "error": "Failed to decode JSON response" });
        assert_eq!(decode_response_body("not json"), expected);
        assert_eq!(decode_response_body(""), expected);
        assert_eq!(decode_response_body("<html>502</html>"), expected);
    }

    #[test]
    fn test_default_client() {
        let client = BitfinexRestClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "https://api.bitfinex.com/v2");
        assert!(format!("{:?}", client).contains("has_credentials: false"));
    }

    #[test]
    fn test_builder_keeps_timeout() {
        let builder = BitfinexRestClient::builder().timeout(Duration::from_millis(250));
        assert_eq!(builder.timeout, Duration::from_millis(250));
        assert!(builder.build().is_ok());
        assert_eq!(BitfinexRestClient::builder().timeout, DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_send_without_credentials() {
        let client = BitfinexRestClient::builder().build().unwrap();
        let result = client.list_orders().await;
        assert!(matches!(result, Err(BitfinexError::MissingCredentials)));
    }
}
