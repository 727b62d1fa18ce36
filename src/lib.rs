//! # Bitfinex CLI
//!
//! A small client for the Bitfinex v2 authenticated REST API, and the `bfx`
//! command-line tool built on it.
//!
//! ## Features
//!
//! - Nonce-based HMAC-SHA384 request signing
//! - Place, modify and cancel orders; list orders and positions
//! - Amounts and prices carried as `rust_decimal` and sent as decimal strings
//! - Exchange responses returned verbatim as JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitfinex_cli::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Config::from_env()?.client()?;
//!     let positions = client.list_positions().await?;
//!     println!("{positions}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, BitfinexError};
pub use rest::{BitfinexClient, BitfinexRestClient};
pub use types::common::OrderType;

/// Result type alias using BitfinexError
pub type Result<T> = std::result::Result<T, BitfinexError>;
