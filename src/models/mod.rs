//! Data models for the site runtime
//!
//! Quotes are fetched and thrown away each refresh; plans and the price
//! table are fixed at startup.

pub mod plan;
pub mod quote;

pub use plan::{parse_period, Plan, PriceTable};
pub use quote::{Direction, PriceQuote};
