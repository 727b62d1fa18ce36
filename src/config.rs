//! Runtime configuration loaded from the environment.
//!
//! A `.env` file in the working directory is read first if present. Recognised
//! variables:
//! - `BITFINEX_API_KEY`, `BITFINEX_API_SECRET`: required credentials
//! - `BITFINEX_API_URL`: base URL override (default `https://api.bitfinex.com/v2`)
//! - `BITFINEX_TIMEOUT_SECS`: per-request timeout in seconds (default 30)

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::{Credentials, EnvCredentials, StaticCredentials};
use crate::error::BitfinexError;
use crate::rest::{BITFINEX_BASE_URL, BitfinexRestClient, DEFAULT_TIMEOUT};

pub use crate::auth::{API_KEY_VAR, API_SECRET_VAR};

pub const API_URL_VAR: &str = "BITFINEX_API_URL";
pub const TIMEOUT_VAR: &str = "BITFINEX_TIMEOUT_SECS";

/// Everything needed to construct a client.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, BitfinexError> {
        // A missing .env file is not an error.
        let _ = dotenv::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BitfinexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = EnvCredentials::from_lookup(&lookup)?.into_credentials();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = match get(API_URL_VAR) {
            Some(raw) => validate_base_url(raw.trim())?,
            None => BITFINEX_BASE_URL.to_string(),
        };

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    BitfinexError::Config(format!(
                        "{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(BitfinexError::Config(format!(
                        "{TIMEOUT_VAR} must be positive"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            credentials,
            base_url,
            timeout,
        })
    }

    /// Build a client from this configuration.
    pub fn client(&self) -> Result<BitfinexRestClient, BitfinexError> {
        BitfinexRestClient::builder()
            .base_url(self.base_url.clone())
            .credentials(Arc::new(StaticCredentials::from(self.credentials.clone())))
            .timeout(self.timeout)
            .build()
    }
}

fn validate_base_url(raw: &str) -> Result<String, BitfinexError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(BitfinexError::Config(format!(
            "{API_URL_VAR} must use http or https, got '{other}'"
        ))),
    }
}
