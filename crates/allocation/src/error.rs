use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Partner capital cannot be negative (got {0})")]
    NegativeCapital(Decimal),

    #[error("Partner name cannot be empty")]
    EmptyName,

    #[error("Partner {figure} are too large to compute")]
    Overflow { figure: &'static str },
}
