//! Common types used across the Bitfinex client library.

pub mod common;

pub use common::*;
