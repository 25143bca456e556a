use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How far the live price must drift from the manual price before the shop is nudged.
pub const ADVICE_BAND: Decimal = dec!(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketAdvice {
    /// Live market is well above the shop's price.
    SellOpportunity,
    /// Live market is well below the shop's price.
    BuyOpportunity,
    Stable,
}

/// Compares an observed live 24k price against the manually set one.
///
/// A band edge beyond the representable range can never be crossed.
pub fn advise(live_24k: Decimal, manual_24k: Decimal) -> MarketAdvice {
    let above = manual_24k.checked_add(ADVICE_BAND).is_some_and(|upper| live_24k > upper);
    let below = manual_24k.checked_sub(ADVICE_BAND).is_some_and(|lower| live_24k < lower);
    if above {
        MarketAdvice::SellOpportunity
    } else if below {
        MarketAdvice::BuyOpportunity
    } else {
        MarketAdvice::Stable
    }
}
