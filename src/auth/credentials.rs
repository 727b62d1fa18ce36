//! Credential management for Bitfinex API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::BitfinexError;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "BITFINEX_API_KEY";
/// Default environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BITFINEX_API_SECRET";

/// API credentials containing the key and secret.
///
/// The secret is only ever used as the HMAC key and is never transmitted.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The API secret (private, used for signing)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl From<Credentials> for StaticCredentials {
    fn from(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials read from environment variables.
///
/// Reads `BITFINEX_API_KEY` and `BITFINEX_API_SECRET`. Blank values count as unset.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Read credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BitfinexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let api_key = get(API_KEY_VAR).ok_or(BitfinexError::MissingCredentials)?;
        let api_secret = get(API_SECRET_VAR).ok_or(BitfinexError::MissingCredentials)?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }

    /// Read credentials from the process environment.
    ///
    /// Returns `None` if either variable is unset.
    pub fn try_from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok()).ok()
    }

    /// Unwrap into the held credentials.
    pub fn into_credentials(self) -> Credentials {
        self.credentials
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
