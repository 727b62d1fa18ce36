//! Command-line surface for the `bfx` binary.
//!
//! Each subcommand maps to exactly one trading operation. Dispatch matches the
//! parsed [`Command`] variant, never the raw command string.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::warn;

use crate::error::{ApiError, BitfinexError};
use crate::rest::endpoints::auth;
use crate::rest::{BitfinexClient, CancelOrderRequest, ModifyOrderRequest, PlaceOrderRequest};
use crate::types::{DEFAULT_SYMBOL, OrderType};

#[derive(Debug, Parser)]
#[command(name = "bfx")]
#[command(about = "Bitfinex API Command Line Tool")]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Place a new order
    #[command(name = "p")]
    PlaceOrder {
        /// Amount of the order (negative to sell)
        #[arg(long, allow_negative_numbers = true, value_parser = parse_decimal)]
        amount: Decimal,
        /// Price of the order
        #[arg(long, allow_negative_numbers = true, value_parser = parse_decimal)]
        price: Decimal,
        /// Type of the order
        #[arg(long = "order_type", default_value_t = OrderType::default())]
        order_type: OrderType,
        /// Trading symbol
        #[arg(long, default_value = DEFAULT_SYMBOL)]
        symbol: String,
    },
    /// Modify an existing order
    #[command(name = "m")]
    ModifyOrder {
        /// ID of the order to modify
        #[arg(long = "order_id")]
        order_id: i64,
        /// New amount of the order
        #[arg(long = "new_amount", allow_negative_numbers = true, value_parser = parse_decimal)]
        new_amount: Decimal,
        /// New price of the order
        #[arg(long = "new_price", allow_negative_numbers = true, value_parser = parse_decimal)]
        new_price: Decimal,
    },
    /// Cancel an order
    #[command(name = "c")]
    CancelOrder {
        /// ID of the order to cancel
        #[arg(long = "order_id")]
        order_id: i64,
    },
    /// Get all active orders
    #[command(name = "g")]
    ListOrders,
    /// Retrieve all positions
    #[command(name = "rp")]
    ListPositions,
}

impl Command {
    /// The endpoint this command calls.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Command::PlaceOrder { .. } => auth::ORDER_SUBMIT,
            Command::ModifyOrder { .. } => auth::ORDER_UPDATE,
            Command::CancelOrder { .. } => auth::ORDER_CANCEL,
            Command::ListOrders => auth::ORDERS,
            Command::ListPositions => auth::POSITIONS,
        }
    }
}

/// Largest number of fractional digits a `Decimal` holds.
const MAX_DECIMAL_SCALE: i64 = 28;

/// Parse a decimal flag, accepting scientific notation (`1e-3`).
///
/// Input that cannot be held without rounding is rejected.
pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    let invalid = |e: &dyn std::fmt::Display| format!("'{raw}' is not a decimal number: {e}");

    let Some((mantissa, exponent)) = raw.split_once(['e', 'E']) else {
        return Decimal::from_str_exact(raw).map_err(|e| invalid(&e));
    };

    // from_scientific rounds past the maximum scale, so check the scale first.
    let exponent: i64 = exponent.parse().map_err(|e| invalid(&e))?;
    let fraction_digits = mantissa
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as i64);
    if fraction_digits.saturating_sub(exponent) > MAX_DECIMAL_SCALE {
        return Err(invalid(&"more than 28 fractional digits"));
    }
    Decimal::from_str_exact(mantissa).map_err(|e| invalid(&e))?;
    Decimal::from_scientific(raw).map_err(|e| invalid(&e))
}

/// Run one command against a client.
pub async fn execute<C: BitfinexClient>(
    client: &C,
    command: &Command,
) -> Result<Value, BitfinexError> {
    match command {
        Command::PlaceOrder {
            amount,
            price,
            order_type,
            symbol,
        } => {
            let request = PlaceOrderRequest::new(*amount, *price)
                .order_type(*order_type)
                .symbol(symbol.as_str());
            client.place_order(&request).await
        }
        Command::ModifyOrder {
            order_id,
            new_amount,
            new_price,
        } => {
            let request = ModifyOrderRequest::new(*order_id, *new_amount, *new_price);
            client.modify_order(&request).await
        }
        Command::CancelOrder { order_id } => {
            client.cancel_order(&CancelOrderRequest::new(*order_id)).await
        }
        Command::ListOrders => client.list_orders().await,
        Command::ListPositions => client.list_positions().await,
    }
}

/// Log exchange-reported errors without altering the response.
pub fn report_api_error(command: &Command, response: &Value) -> Option<ApiError> {
    let api_error = ApiError::from_value(response)?;
    if api_error.is_invalid_nonce() {
        warn!(
            endpoint = command.endpoint(),
            %api_error,
            "nonce rejected; another client may be using this key"
        );
    } else {
        warn!(endpoint = command.endpoint(), %api_error, "exchange rejected the request");
    }
    Some(api_error)
}

/// Pretty-print a value as JSON with four-space indentation.
pub fn render_json(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
