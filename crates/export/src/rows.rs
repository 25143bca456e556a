use crate::csv_writer::CsvRecord;
use core_types::Transaction;
use rust_decimal::Decimal;

/// The report screen's export shape: one line per ledger record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    pub kind: String,
    pub date: String,
    pub party: String,
    pub weight: Decimal,
    pub karat: Decimal,
    pub total: Decimal,
}

impl From<&Transaction> for StatementRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind.to_string(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            party: tx.party().to_string(),
            weight: tx.weight.unwrap_or(Decimal::ZERO),
            karat: tx.karat.unwrap_or(Decimal::ZERO),
            total: tx.total_amount,
        }
    }
}

impl CsvRecord for StatementRow {
    fn headers() -> Vec<&'static str> {
        vec!["Type", "Date", "Party", "Weight", "Karat", "Total"]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.kind.clone(),
            self.date.clone(),
            self.party.clone(),
            self.weight.normalize().to_string(),
            self.karat.normalize().to_string(),
            self.total.normalize().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn expense_without_metal_exports_zeros() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": "9",
            "type": "EXPENSE",
            "date": "2025-01-31",
            "description": "Rent",
            "totalAmount": 20000,
            "isPaid": true
        }))
        .unwrap();
        let row = StatementRow::from(&tx);
        assert_eq!(row.kind, "EXPENSE");
        assert_eq!(row.party, "Rent");
        assert_eq!(row.values(), vec!["EXPENSE", "2025-01-31", "Rent", "0", "0", "20000"]);
    }

    #[test]
    fn trade_keeps_full_precision_total() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": "10",
            "type": "SELL",
            "date": "2025-02-01",
            "customerName": "Hassan",
            "weight": 3.333,
            "karat": 875,
            "totalAmount": 8975.60235,
            "isPaid": true
        }))
        .unwrap();
        let row = StatementRow::from(&tx);
        assert_eq!(row.total, dec!(8975.60235));
        assert_eq!(row.values()[3], "3.333");
    }
}
