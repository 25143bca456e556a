use crate::error::AnalyticsError;
use core_types::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which records a statement covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl StatementFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            StatementFilter::All => true,
            StatementFilter::Only(kind) => tx.kind == *kind,
        }
    }
}

impl fmt::Display for StatementFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementFilter::All => f.write_str("ALL"),
            StatementFilter::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for StatementFilter {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatementFilter::All);
        }
        s.parse::<TransactionType>()
            .map(StatementFilter::Only)
            .map_err(|_| AnalyticsError::UnknownFilter(s.to_string()))
    }
}

/// A filtered listing of the ledger with the sum of its amounts.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    #[serde(serialize_with = "serialize_filter")]
    pub filter: StatementFilter,
    pub rows: Vec<Transaction>,
    pub total: Decimal,
}

impl Statement {
    pub fn build(ledger: &[Transaction], filter: StatementFilter) -> Result<Self, AnalyticsError> {
        let rows: Vec<Transaction> = ledger.iter().filter(|t| filter.matches(t)).cloned().collect();
        let total = rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.total_amount))
            .ok_or(AnalyticsError::Overflow { figure: "statement totals" })?;
        Ok(Self { filter, rows, total })
    }
}

fn serialize_filter<S: serde::Serializer>(filter: &StatementFilter, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(filter)
}
