//! Trait definition for the Bitfinex trading operations.
//!
//! The command dispatcher is written against [`BitfinexClient`] so it can be
//! driven by a mock in tests.

use std::future::Future;

use serde_json::Value;

use crate::error::BitfinexError;
use crate::rest::types::{CancelOrderRequest, ModifyOrderRequest, PlaceOrderRequest};

/// The five trading operations exposed by the client.
///
/// All methods return the exchange's JSON response unmodified.
pub trait BitfinexClient: Send + Sync {
    /// Submit a new order.
    fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> impl Future<Output = Result<Value, BitfinexError>> + Send;

    /// Update an existing order.
    fn modify_order(
        &self,
        request: &ModifyOrderRequest,
    ) -> impl Future<Output = Result<Value, BitfinexError>> + Send;

    /// Cancel an order.
    fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> impl Future<Output = Result<Value, BitfinexError>> + Send;

    /// List active orders.
    fn list_orders(&self) -> impl Future<Output = Result<Value, BitfinexError>> + Send;

    /// List open positions.
    fn list_positions(&self) -> impl Future<Output = Result<Value, BitfinexError>> + Send;
}
