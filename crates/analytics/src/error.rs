use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Unknown statement filter: {0}")]
    UnknownFilter(String),

    /// A stored amount is so large that summing the ledger leaves the decimal range.
    #[error("The ledger's {figure} are too large to compute")]
    Overflow { figure: &'static str },
}
