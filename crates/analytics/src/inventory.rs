use crate::error::AnalyticsError;
use core_types::Transaction;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Grams of 24k-equivalent gold a record moves, or `None` if it moves none.
///
/// Only BUY and SELL records carrying both a weight and a karat count. ANALYSIS
/// records may note the weight of the tested ingot, but that gold never belonged
/// to the shop.
pub fn pure_content(tx: &Transaction) -> Result<Option<Decimal>, AnalyticsError> {
    let (Some(weight), Some(karat)) = (tx.weight, tx.karat) else {
        return Ok(None);
    };
    if !tx.kind.is_metal_trade() {
        return Ok(None);
    }
    weight
        .checked_mul(karat / dec!(1000))
        .map(Some)
        .ok_or(AnalyticsError::Overflow { figure: "trade weights" })
}
