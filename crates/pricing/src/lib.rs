//! # Pyramids Gold Pricing
//!
//! Turns the manually set 24k spot price into per-gram quotes, and turns a weight,
//! a price and a discount into the amount that goes on the ledger.
//!
//! ## Architectural Principles
//!
//! - **Pure functions:** nothing here holds state. Every quote is re-derived from
//!   the current settings, so changing the spot price, karat or operation type
//!   always yields a fresh figure.
//! - **Validation lives here:** negative weights or prices, karat outside 0–1000
//!   and discounts outside 0–100 are rejected before anything reaches the ledger.
//!
//! ## Public API
//!
//! - `quote`, `quote_for`: spot price + fineness + side → `PriceQuote`.
//! - `price_for_entry`: the derived quote, or the operator override.
//! - `line_total`: weight × price − discount → `LineTotal`.
//! - `estimate_assay`: pure-gold content and melt value of an ingot.
//! - `advise`: compares an observed live price with the manual one.
//! - `PricingError`: the validation failures.

pub mod advice;
pub mod assay;
pub mod error;
pub mod quote;
pub mod total;
pub mod validation;

pub use advice::{advise, MarketAdvice, ADVICE_BAND};
pub use assay::{estimate_assay, AssayEstimate};
pub use error::PricingError;
pub use quote::{
    base_quote, price_for_entry, quote, quote_for, round_currency, PriceQuote, SPREAD_PER_GRAM,
};
pub use total::{line_total, LineTotal};
