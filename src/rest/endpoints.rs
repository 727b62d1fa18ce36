//! Bitfinex REST API endpoint constants.

/// Base URL for the Bitfinex v2 REST API.
pub const BITFINEX_BASE_URL: &str = "https://api.bitfinex.com/v2";

/// Path prefix prepended to an endpoint when building the signing string.
pub const API_PATH_PREFIX: &str = "/api/v2/";

/// Authenticated endpoints. Paths are relative, without a leading slash.
pub mod auth {
    /// Submit a new order.
    pub const ORDER_SUBMIT: &str = "auth/w/order/submit";
    /// Update an existing order.
    pub const ORDER_UPDATE: &str = "auth/w/order/update";
    /// Cancel an order.
    pub const ORDER_CANCEL: &str = "auth/w/order/cancel";
    /// List active orders.
    pub const ORDERS: &str = "auth/r/orders";
    /// List open positions.
    pub const POSITIONS: &str = "auth/r/positions";
}
