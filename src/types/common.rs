//! Common domain types for the Bitfinex API.

use serde::{Deserialize, Serialize};

/// Default order type used by the command line when none is given.
pub const DEFAULT_ORDER_TYPE: OrderType = OrderType::ExchangeLimit;

/// Default trading symbol, the exchange's paper-trading pair.
pub const DEFAULT_SYMBOL: &str = "tTESTBTC:TESTUSD";

/// Order type for trading.
///
/// Plain variants trade on margin; `Exchange*` variants trade on the
/// exchange (spot) wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Margin limit order
    #[serde(rename = "LIMIT")]
    Limit,
    /// Margin market order
    #[serde(rename = "MARKET")]
    Market,
    /// Margin stop order
    #[serde(rename = "STOP")]
    Stop,
    /// Margin stop-limit order
    #[serde(rename = "STOP LIMIT")]
    StopLimit,
    /// Margin trailing stop
    #[serde(rename = "TRAILING STOP")]
    TrailingStop,
    /// Margin fill-or-kill
    #[serde(rename = "FOK")]
    Fok,
    /// Margin immediate-or-cancel
    #[serde(rename = "IOC")]
    Ioc,
    /// Exchange limit order
    #[serde(rename = "EXCHANGE LIMIT")]
    ExchangeLimit,
    /// Exchange market order
    #[serde(rename = "EXCHANGE MARKET")]
    ExchangeMarket,
    /// Exchange stop order
    #[serde(rename = "EXCHANGE STOP")]
    ExchangeStop,
    /// Exchange stop-limit order
    #[serde(rename = "EXCHANGE STOP LIMIT")]
    ExchangeStopLimit,
    /// Exchange trailing stop
    #[serde(rename = "EXCHANGE TRAILING STOP")]
    ExchangeTrailingStop,
    /// Exchange fill-or-kill
    #[serde(rename = "EXCHANGE FOK")]
    ExchangeFok,
    /// Exchange immediate-or-cancel
    #[serde(rename = "EXCHANGE IOC")]
    ExchangeIoc,
}

impl OrderType {
    /// Every order type, in wire order.
    pub const ALL: [OrderType; 14] = [
        OrderType::Limit,
        OrderType::Market,
        OrderType::Stop,
        OrderType::StopLimit,
        OrderType::TrailingStop,
        OrderType::Fok,
        OrderType::Ioc,
        OrderType::ExchangeLimit,
        OrderType::ExchangeMarket,
        OrderType::ExchangeStop,
        OrderType::ExchangeStopLimit,
        OrderType::ExchangeTrailingStop,
        OrderType::ExchangeFok,
        OrderType::ExchangeIoc,
    ];

    /// The string the exchange expects in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::Stop => "STOP",
            OrderType::StopLimit => "STOP LIMIT",
            OrderType::TrailingStop => "TRAILING STOP",
            OrderType::Fok => "FOK",
            OrderType::Ioc => "IOC",
            OrderType::ExchangeLimit => "EXCHANGE LIMIT",
            OrderType::ExchangeMarket => "EXCHANGE MARKET",
            OrderType::ExchangeStop => "EXCHANGE STOP",
            OrderType::ExchangeStopLimit => "EXCHANGE STOP LIMIT",
            OrderType::ExchangeTrailingStop => "EXCHANGE TRAILING STOP",
            OrderType::ExchangeFok => "EXCHANGE FOK",
            OrderType::ExchangeIoc => "EXCHANGE IOC",
        }
    }
}

impl Default for OrderType {
    fn default() -> Self {
        DEFAULT_ORDER_TYPE
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown order type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order type '{0}'")]
pub struct ParseOrderTypeError(String);

impl std::str::FromStr for OrderType {
    type Err = ParseOrderTypeError;

    /// Accepts the wire form case-insensitively, with `_` or `-` in place of spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        OrderType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| ParseOrderTypeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_wire_names() {
        for order_type in OrderType::ALL {
            let json = serde_json::to_string(&order_type).unwrap();
            assert_eq!(json, format!("\"{}\"", order_type.as_str()));
        }
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!("EXCHANGE LIMIT".parse(), Ok(OrderType::ExchangeLimit));
        assert_eq!("exchange_market".parse(), Ok(OrderType::ExchangeMarket));
        assert_eq!("stop-limit".parse(), Ok(OrderType::StopLimit));
        assert!("SOMETIMES".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_default_order_type() {
        assert_eq!(OrderType::default().to_string(), "EXCHANGE LIMIT");
    }
}
