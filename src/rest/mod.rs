//! Bitfinex authenticated REST API client.
//!
//! [`BitfinexRestClient`] signs and sends requests; [`BitfinexClient`]
//! abstracts the trading operations over it.

mod client;
pub mod endpoints;
mod orders;
mod traits;
mod types;

pub use client::{
    BitfinexRestClient, BitfinexRestClientBuilder, DECODE_ERROR_MESSAGE, DEFAULT_TIMEOUT,
    decode_response_body,
};
pub use endpoints::BITFINEX_BASE_URL;
pub use traits::BitfinexClient;
pub use types::{CancelOrderRequest, ModifyOrderRequest, PlaceOrderRequest};
