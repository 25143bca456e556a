use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four kinds of record the ledger holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Gold bought from a customer. Adds to inventory, costs money.
    Buy,
    /// Gold sold to a customer. Removes from inventory, brings in money.
    Sell,
    /// An assay (fineness test) performed for a flat service fee.
    Analysis,
    /// An operating cost such as rent or salaries.
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Buy,
        TransactionType::Sell,
        TransactionType::Analysis,
        TransactionType::Expense,
    ];

    /// Returns `true` for the two types that move gold in or out of stock.
    pub fn is_metal_trade(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Sell)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Analysis => "ANALYSIS",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            "ANALYSIS" => Ok(TransactionType::Analysis),
            "EXPENSE" => Ok(TransactionType::Expense),
            _ => Err(CoreError::UnknownTransactionType(s.to_string())),
        }
    }
}

/// Status of a gold transport authorization. Nothing moves a permission from
/// `Pending` to `Completed` yet; both values exist so stored records round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Limited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_uses_upper_case_wire_names() {
        let json = serde_json::to_string(&TransactionType::Analysis).unwrap();
        assert_eq!(json, "\"ANALYSIS\"");
        let parsed: TransactionType = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(parsed, TransactionType::Sell);
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("buy".parse::<TransactionType>(), Ok(TransactionType::Buy));
        assert_eq!(" Expense ".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!(matches!(
            "gift".parse::<TransactionType>(),
            Err(CoreError::UnknownTransactionType(_))
        ));
    }

    #[test]
    fn only_buy_and_sell_are_metal_trades() {
        let trades: Vec<_> = TransactionType::ALL
            .iter()
            .filter(|t| t.is_metal_trade())
            .collect();
        assert_eq!(trades, vec![&TransactionType::Buy, &TransactionType::Sell]);
    }
}
