//! Order and position endpoints.
//!
//! Each operation fixes an endpoint and hands its payload to
//! [`BitfinexRestClient::send`]. Responses are returned undecoded so the
//! caller sees exactly what the exchange said.

use serde_json::Value;

use crate::error::BitfinexError;
use crate::rest::BitfinexRestClient;
use crate::rest::endpoints::auth;
use crate::rest::types::{CancelOrderRequest, ModifyOrderRequest, PlaceOrderRequest};

impl BitfinexRestClient {
    /// Submit a new order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitfinex_cli::auth::StaticCredentials;
    /// use bitfinex_cli::rest::{BitfinexRestClient, PlaceOrderRequest};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = BitfinexRestClient::builder().credentials(credentials).build()?;
    ///
    ///     let request = PlaceOrderRequest::new(
    ///         Decimal::from_str("0.001")?,
    ///         Decimal::from_str("50000.5")?,
    ///     );
    ///     let response = client.place_order(&request).await?;
    ///     println!("{response}");
    ///     Ok(())
    /// }
    /// ```
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Value, BitfinexError> {
        self.send(auth::ORDER_SUBMIT, Some(request)).await
    }

    /// Change the amount and price of an existing order.
    pub async fn modify_order(&self, request: &ModifyOrderRequest) -> Result<Value, BitfinexError> {
        self.send(auth::ORDER_UPDATE, Some(request)).await
    }

    /// Cancel an order by ID.
    pub async fn cancel_order(&self, request: &CancelOrderRequest) -> Result<Value, BitfinexError> {
        self.send(auth::ORDER_CANCEL, Some(request)).await
    }

    /// List active orders.
    pub async fn list_orders(&self) -> Result<Value, BitfinexError> {
        self.send_raw(auth::ORDERS, None).await
    }

    /// List open positions.
    pub async fn list_positions(&self) -> Result<Value, BitfinexError> {
        self.send_raw(auth::POSITIONS, None).await
    }
}
