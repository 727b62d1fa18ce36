//! Request payloads for the order endpoints.
//!
//! Field order here is the key order of the serialized body, which is also
//! the order that gets signed.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{DEFAULT_SYMBOL, OrderType};

/// Body for `auth/w/order/submit`.
///
/// `amount` is positive to buy and negative to sell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceOrderRequest {
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Trading pair symbol (e.g. `tBTCUSD`).
    pub symbol: String,
    /// Order amount.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Limit price.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl PlaceOrderRequest {
    /// Create an `EXCHANGE LIMIT` order on the default symbol.
    pub fn new(amount: Decimal, price: Decimal) -> Self {
        Self {
            order_type: OrderType::default(),
            symbol: DEFAULT_SYMBOL.to_string(),
            amount,
            price,
        }
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Set the trading symbol.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}

/// Body for `auth/w/order/update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifyOrderRequest {
    /// Exchange-assigned order ID.
    pub id: i64,
    /// New amount.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// New price.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
}

impl ModifyOrderRequest {
    pub fn new(id: i64, amount: Decimal, price: Decimal) -> Self {
        Self { id, amount, price }
    }
}

/// Body for `auth/w/order/cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancelOrderRequest {
    /// Exchange-assigned order ID.
    pub id: i64,
}

impl CancelOrderRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_place_order_serialization() {
        let request = PlaceOrderRequest::new(
            Decimal::from_str("0.001").unwrap(),
            Decimal::from_str("50000.5").unwrap(),
        );
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"EXCHANGE LIMIT","symbol":"tTESTBTC:TESTUSD","amount":"0.001","price":"50000.5"}"#
        );
    }

    #[test]
    fn test_place_order_builder() {
        let request = PlaceOrderRequest::new(Decimal::new(-25, 1), Decimal::from(30_000))
            .order_type(OrderType::Limit)
            .symbol("tBTCUSD");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"LIMIT","symbol":"tBTCUSD","amount":"-2.5","price":"30000"}"#
        );
    }

    #[test]
    fn test_modify_order_serialization() {
        let request = ModifyOrderRequest::new(
            123456789,
            Decimal::from_str("0.02").unwrap(),
            Decimal::from_str("41000.25").unwrap(),
        );
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"id":123456789,"amount":"0.02","price":"41000.25"}"#);
    }

    #[test]
    fn test_cancel_order_serialization() {
        let json = serde_json::to_string(&CancelOrderRequest::new(12345)).unwrap();
        assert_eq!(json, r#"{"id":12345}"#);
    }
}
