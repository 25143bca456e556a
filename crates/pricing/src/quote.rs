use crate::error::PricingError;
use crate::validation::{checked_product, ensure_karat, ensure_non_negative};
use core_types::{Settings, TransactionType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fixed per-gram markup on SELL and markdown on BUY.
pub const SPREAD_PER_GRAM: Decimal = dec!(50);

const FINENESS_SCALE: Decimal = dec!(1000);

/// A derived per-gram price for a BUY or SELL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// `(P24 / 1000) * karat`, unrounded.
    pub base: Decimal,
    /// Signed spread: `-50` for BUY, `+50` for SELL.
    pub spread: Decimal,
    /// `base + spread`, rounded to a whole currency unit. This is what the entry form shows.
    pub price_per_gram: Decimal,
}

/// Rounds a currency amount to a whole unit, midpoint to even.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round()
}

/// The spread-free value of one gram at fineness `karat`.
///
/// A zero spot price or a missing karat yields zero rather than an error.
pub fn base_quote(spot_24k: Decimal, karat: Option<Decimal>) -> Result<Decimal, PricingError> {
    ensure_non_negative("spot price", spot_24k)?;
    let Some(karat) = karat else {
        return Ok(Decimal::ZERO);
    };
    let karat = ensure_karat(karat)?;
    if spot_24k.is_zero() {
        return Ok(Decimal::ZERO);
    }
    checked_product("base price", spot_24k / FINENESS_SCALE, karat)
}

/// Quotes a per-gram price for a trade.
///
/// Returns `Ok(None)` for ANALYSIS and EXPENSE: an analysis is priced as a flat fee
/// and an expense has no per-gram price at all.
pub fn quote(
    kind: TransactionType,
    spot_24k: Decimal,
    karat: Option<Decimal>,
) -> Result<Option<PriceQuote>, PricingError> {
    let spread = match kind {
        TransactionType::Buy => -SPREAD_PER_GRAM,
        TransactionType::Sell => SPREAD_PER_GRAM,
        TransactionType::Analysis | TransactionType::Expense => return Ok(None),
    };

    let base = base_quote(spot_24k, karat)?;
    let price_per_gram = base
        .checked_add(spread)
        .map(round_currency)
        .ok_or(PricingError::Overflow { field: "price per gram" })?;
    tracing::debug!(%kind, %spot_24k, ?karat, %price_per_gram, "Derived price quote.");

    Ok(Some(PriceQuote {
        base,
        spread,
        price_per_gram,
    }))
}

/// Same as [`quote`], reading the spot price from a settings snapshot.
pub fn quote_for(
    settings: &Settings,
    kind: TransactionType,
    karat: Option<Decimal>,
) -> Result<Option<PriceQuote>, PricingError> {
    quote(kind, settings.gold_price24, karat)
}

/// The per-gram price a new entry is saved with.
///
/// An operator override wins over the derived quote. ANALYSIS has no derived
/// quote, so its override is the flat fee and a missing one means no price.
pub fn price_for_entry(
    settings: &Settings,
    kind: TransactionType,
    karat: Option<Decimal>,
    override_price: Option<Decimal>,
) -> Result<Option<Decimal>, PricingError> {
    if let Some(price) = override_price {
        return ensure_non_negative("price per gram", price).map(Some);
    }
    Ok(quote_for(settings, kind, karat)?.map(|q| q.price_per_gram))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sell_21k_at_3100_quotes_2762() {
        let q = quote(TransactionType::Sell, dec!(3100), Some(dec!(875)))
            .unwrap()
            .unwrap();
        assert_eq!(q.base, dec!(2712.5));
        assert_eq!(q.spread, dec!(50));
        assert_eq!(q.price_per_gram, dec!(2762));
    }

    #[test]
    fn buy_subtracts_the_spread() {
        let q = quote(TransactionType::Buy, dec!(3100), Some(dec!(750)))
            .unwrap()
            .unwrap();
        assert_eq!(q.base, dec!(2325));
        assert_eq!(q.price_per_gram, dec!(2275));
    }

    #[test]
    fn buy_and_sell_of_the_same_gram_differ_by_twice_the_spread() {
        let buy = quote(TransactionType::Buy, dec!(3000), Some(dec!(999))).unwrap().unwrap();
        let sell = quote(TransactionType::Sell, dec!(3000), Some(dec!(999))).unwrap().unwrap();
        assert_eq!(sell.price_per_gram - buy.price_per_gram, dec!(100));
    }

    #[test]
    fn analysis_and_expense_are_not_quoted() {
        assert_eq!(quote(TransactionType::Analysis, dec!(3100), Some(dec!(875))), Ok(None));
        assert_eq!(quote(TransactionType::Expense, dec!(3100), None), Ok(None));
    }

    #[test]
    fn zero_spot_or_missing_karat_gives_zero_base() {
        assert_eq!(base_quote(Decimal::ZERO, Some(dec!(875))), Ok(Decimal::ZERO));
        assert_eq!(base_quote(dec!(3100), None), Ok(Decimal::ZERO));
        let q = quote(TransactionType::Sell, Decimal::ZERO, Some(dec!(875)))
            .unwrap()
            .unwrap();
        assert_eq!(q.base, Decimal::ZERO);
        assert_eq!(q.price_per_gram, SPREAD_PER_GRAM);
    }

    #[test]
    fn rejects_out_of_range_karat_and_negative_spot() {
        assert_eq!(
            quote(TransactionType::Sell, dec!(3100), Some(dec!(1200))),
            Err(PricingError::KaratOutOfRange(dec!(1200)))
        );
        assert!(matches!(
            quote(TransactionType::Buy, dec!(-1), Some(dec!(875))),
            Err(PricingError::NegativeValue { field: "spot price", .. })
        ));
    }

    #[test]
    fn quote_for_reads_the_settings_spot_price() {
        let mut settings = Settings::default();
        let before = quote_for(&settings, TransactionType::Sell, Some(dec!(875))).unwrap().unwrap();
        settings.gold_price24 = dec!(4000);
        let after = quote_for(&settings, TransactionType::Sell, Some(dec!(875))).unwrap().unwrap();
        assert_eq!(before.price_per_gram, dec!(2762));
        assert_eq!(after.price_per_gram, dec!(3550));
    }

    #[test]
    fn override_wins_over_the_derived_quote() {
        let settings = Settings::default();
        let derived = price_for_entry(&settings, TransactionType::Sell, Some(dec!(875)), None);
        assert_eq!(derived, Ok(Some(dec!(2762))));
        let manual = price_for_entry(&settings, TransactionType::Sell, Some(dec!(875)), Some(dec!(2800)));
        assert_eq!(manual, Ok(Some(dec!(2800))));
        assert_eq!(price_for_entry(&settings, TransactionType::Analysis, None, None), Ok(None));
        assert!(price_for_entry(&settings, TransactionType::Buy, None, Some(dec!(-5))).is_err());
    }
}
