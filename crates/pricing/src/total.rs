use crate::error::PricingError;
use crate::quote::round_currency;
use crate::validation::{checked_product, ensure_discount, ensure_non_negative};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The monetary waterfall of a single BUY or SELL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotal {
    /// `weight * price_per_gram`
    pub raw: Decimal,
    /// `raw * discount / 100`
    pub discount_amount: Decimal,
    /// `raw - discount_amount`, full precision. This is what gets stored.
    pub total: Decimal,
}

impl LineTotal {
    /// The total rounded for display. Never store this.
    pub fn display_total(&self) -> Decimal {
        round_currency(self.total)
    }
}

/// Computes the amount of a trade line, rejecting negative inputs,
/// discounts outside 0–100 and amounts too large to represent.
pub fn line_total(
    weight: Decimal,
    price_per_gram: Decimal,
    discount_pct: Option<Decimal>,
) -> Result<LineTotal, PricingError> {
    let weight = ensure_non_negative("weight", weight)?;
    let price_per_gram = ensure_non_negative("price per gram", price_per_gram)?;
    let discount_pct = ensure_discount(discount_pct.unwrap_or(Decimal::ZERO))?;

    let raw = checked_product("raw total", weight, price_per_gram)?;
    let discount_amount = checked_product("discount amount", raw, discount_pct / dec!(100))?;
    let total = raw
        .checked_sub(discount_amount)
        .ok_or(PricingError::Overflow { field: "total" })?;

    Ok(LineTotal {
        raw,
        discount_amount,
        total,
    })
}
