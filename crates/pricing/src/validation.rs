//! Input checks shared by the quote and total calculators.

use crate::error::PricingError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const MAX_KARAT: Decimal = dec!(1000);
pub const MAX_DISCOUNT_PCT: Decimal = dec!(100);

pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, PricingError> {
    if value < Decimal::ZERO {
        return Err(PricingError::NegativeValue { field, value });
    }
    Ok(value)
}

pub fn ensure_karat(karat: Decimal) -> Result<Decimal, PricingError> {
    if karat < Decimal::ZERO || karat > MAX_KARAT {
        return Err(PricingError::KaratOutOfRange(karat));
    }
    Ok(karat)
}

pub fn ensure_discount(discount: Decimal) -> Result<Decimal, PricingError> {
    if discount < Decimal::ZERO || discount > MAX_DISCOUNT_PCT {
        return Err(PricingError::DiscountOutOfRange(discount));
    }
    Ok(discount)
}

/// `a * b`, or [`PricingError::Overflow`] naming the figure being computed.
pub fn checked_product(field: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or(PricingError::Overflow { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_accepted() {
        assert_eq!(ensure_non_negative("weight", -Decimal::ZERO), Ok(-Decimal::ZERO));
    }

    #[test]
    fn rejects_negative_weight() {
        assert_eq!(
            ensure_non_negative("weight", dec!(-0.5)),
            Err(PricingError::NegativeValue { field: "weight", value: dec!(-0.5) })
        );
    }

    #[test]
    fn karat_bounds_are_inclusive() {
        assert!(ensure_karat(dec!(0)).is_ok());
        assert!(ensure_karat(dec!(1000)).is_ok());
        assert_eq!(ensure_karat(dec!(1000.1)), Err(PricingError::KaratOutOfRange(dec!(1000.1))));
        assert_eq!(ensure_karat(dec!(-1)), Err(PricingError::KaratOutOfRange(dec!(-1))));
    }

    #[test]
    fn discount_bounds_are_inclusive() {
        assert!(ensure_discount(dec!(0)).is_ok());
        assert!(ensure_discount(dec!(100)).is_ok());
        assert!(ensure_discount(dec!(100.01)).is_err());
    }

    #[test]
    fn checked_product_reports_overflow() {
        assert_eq!(checked_product("raw total", dec!(2), dec!(3)), Ok(dec!(6)));
        assert_eq!(
            checked_product("raw total", Decimal::MAX, dec!(2)),
            Err(PricingError::Overflow { field: "raw total" })
        );
    }
}
