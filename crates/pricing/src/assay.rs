use crate::error::PricingError;
use crate::quote::round_currency;
use crate::validation::{checked_product, ensure_karat, ensure_non_negative};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Melt-value estimate of a tested ingot. No spread is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssayEstimate {
    /// Grams of 24k-equivalent gold: `weight * karat / 1000`.
    pub pure_weight: Decimal,
    /// `pure_weight * spot_24k`, rounded to a whole currency unit.
    pub estimated_value: Decimal,
}

pub fn estimate_assay(
    weight: Decimal,
    karat: Decimal,
    spot_24k: Decimal,
) -> Result<AssayEstimate, PricingError> {
    let weight = ensure_non_negative("weight", weight)?;
    let karat = ensure_karat(karat)?;
    let spot_24k = ensure_non_negative("spot price", spot_24k)?;

    let pure_weight = checked_product("pure weight", weight, karat / dec!(1000))?;
    let value = checked_product("estimated value", pure_weight, spot_24k)?;
    Ok(AssayEstimate {
        pure_weight,
        estimated_value: round_currency(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingot_of_100g_at_875() {
        let estimate = estimate_assay(dec!(100), dec!(875), dec!(3100)).unwrap();
        assert_eq!(estimate.pure_weight, dec!(87.5));
        assert_eq!(estimate.estimated_value, dec!(271250));
    }

    #[test]
    fn fractional_value_is_rounded() {
        let estimate = estimate_assay(dec!(1.234), dec!(999.9), dec!(3100)).unwrap();
        assert_eq!(estimate.pure_weight, dec!(1.2338766));
        assert_eq!(estimate.estimated_value, dec!(3825));
    }

    #[test]
    fn huge_ingot_value_is_an_overflow() {
        assert_eq!(
            estimate_assay(Decimal::MAX, dec!(1000), dec!(3100)),
            Err(PricingError::Overflow { field: "estimated value" })
        );
    }

    #[test]
    fn rejects_bad_fineness() {
        assert_eq!(
            estimate_assay(dec!(1), dec!(1001), dec!(3100)),
            Err(PricingError::KaratOutOfRange(dec!(1001)))
        );
    }
}
