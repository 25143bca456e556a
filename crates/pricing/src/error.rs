use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PricingError {
    #[error("{field} cannot be negative (got {value})")]
    NegativeValue { field: &'static str, value: Decimal },

    #[error("Karat must be between 0 and 1000 parts per thousand (got {0})")]
    KaratOutOfRange(Decimal),

    #[error("Discount must be between 0 and 100 percent (got {0})")]
    DiscountOutOfRange(Decimal),

    #[error("{field} is too large to compute")]
    Overflow { field: &'static str },

    #[error("{field} is required for a {kind} transaction")]
    MissingField { field: &'static str, kind: String },
}
