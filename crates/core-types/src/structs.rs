use crate::enums::{PermissionStatus, TransactionType, UserRole};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Generates a fresh identifier for a new record.
///
/// Identifiers are opaque strings; records restored from a backup keep whatever
/// id they were saved with.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single ledger entry. Immutable once created.
///
/// `total_amount` is authoritative: every aggregate sums it, no matter how it was
/// derived. `weight` and `karat` only matter for inventory, and only on BUY and SELL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDate,
    /// Customer for a trade, or the payee for an expense.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Gross weight in grams.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub weight: Option<Decimal>,
    /// Fineness in parts per 1000.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub karat: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub price_per_gram: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    pub is_paid: bool,
    /// Discount percentage, 0 to 100.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub discount: Option<Decimal>,
    /// Free-form extras, e.g. `{"category": "rent"}` on an expense.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Value>>,
}

impl Transaction {
    /// Counterpart label used by listings: customer, else description, else `-`.
    pub fn party(&self) -> &str {
        self.customer_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.description.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("-")
    }
}

/// The shop-wide settings singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Manually set spot price per gram of 24k gold.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub gold_price24: Decimal,
    /// Reference display price for 21k. Not used by any calculation.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub gold_price21: Decimal,
    /// Reference display price for 18k. Not used by any calculation.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub gold_price18: Decimal,
    /// Stored and editable, but the tax calculation applies fixed rates and ignores it.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_rate: Decimal,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gold_price24: dec!(3100),
            gold_price21: dec!(2700),
            gold_price18: dec!(2300),
            tax_rate: Decimal::ZERO,
            currency: "EGP".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Staff code, e.g. `EMP001`.
    pub code: String,
    pub job_title: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A capital partner.
///
/// `percentage` is a display cache of whatever was typed at creation time (0 for
/// partners added through the shop). Shares are always recomputed from `capital`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub capital: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percentage: Decimal,
}

/// A transport authorization for moving gold off the premises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub employee_id: String,
    /// Denormalized copy of the employee's name at the time of issue.
    pub employee_name: String,
    pub date: NaiveDate,
    pub destination: String,
    /// Free-text description of what is being transported.
    pub items: String,
    #[serde(default)]
    pub status: PermissionStatus,
}

/// An application user. Carried as data so backups stay complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub last_login: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_sell() -> Transaction {
        Transaction {
            id: "1700000000000".to_string(),
            kind: TransactionType::Sell,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            customer_name: Some("Hassan".to_string()),
            description: None,
            weight: Some(dec!(10)),
            karat: Some(dec!(875)),
            price_per_gram: Some(dec!(2762)),
            total_amount: dec!(24858),
            technician_id: None,
            is_paid: true,
            discount: Some(dec!(10)),
            details: None,
        }
    }

    #[test]
    fn transaction_serializes_to_camel_case_numbers() {
        let value = serde_json::to_value(sample_sell()).unwrap();
        assert_eq!(value["type"], json!("SELL"));
        assert_eq!(value["date"], json!("2025-03-01"));
        assert_eq!(value["customerName"], json!("Hassan"));
        assert!(value["totalAmount"].is_number());
        assert_eq!(value["totalAmount"].to_string(), "24858");
        assert_eq!(value["pricePerGram"].to_string(), "2762");
        assert_eq!(value["isPaid"], json!(true));
        assert!(value.get("description").is_none());
    }

    #[test]
    fn amounts_keep_every_digit_through_json() {
        let mut tx = sample_sell();
        tx.weight = Some(dec!(1234.56789));
        tx.price_per_gram = Some(dec!(2762.123456789));
        tx.total_amount = dec!(3297497.97334457434233807);

        let raw = serde_json::to_string(&tx).unwrap();
        assert!(raw.contains("\"totalAmount\":3297497.97334457434233807"));
        let back: Transaction = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn transaction_accepts_minimal_expense_record() {
        let raw = json!({
            "id": "42",
            "type": "EXPENSE",
            "date": "2025-01-31",
            "description": "January rent",
            "totalAmount": 20000,
            "isPaid": true,
            "details": {"category": "rent"}
        });
        let tx: Transaction = serde_json::from_value(raw).unwrap();
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.total_amount, dec!(20000));
        assert_eq!(tx.weight, None);
        assert_eq!(tx.details.unwrap()["category"], json!("rent"));
    }

    #[test]
    fn transaction_rejects_missing_total() {
        let raw = json!({"id": "1", "type": "BUY", "date": "2025-01-01", "isPaid": false});
        assert!(serde_json::from_value::<Transaction>(raw).is_err());
    }

    #[test]
    fn party_falls_back_to_description_then_dash() {
        let mut tx = sample_sell();
        assert_eq!(tx.party(), "Hassan");
        tx.customer_name = None;
        tx.description = Some("walk-in".to_string());
        assert_eq!(tx.party(), "walk-in");
        tx.description = None;
        assert_eq!(tx.party(), "-");
    }

    #[test]
    fn settings_defaults_match_shop_seed() {
        let settings = Settings::default();
        assert_eq!(settings.gold_price24, dec!(3100));
        assert_eq!(settings.currency, "EGP");
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["goldPrice24"].to_string(), "3100");
        assert_eq!(value["taxRate"].to_string(), "0");
    }

    #[test]
    fn permission_status_defaults_to_pending() {
        let raw = json!({
            "id": "p1",
            "employeeId": "1",
            "employeeName": "Ahmed",
            "date": "2025-02-02",
            "destination": "Cairo assay office",
            "items": "3 ingots"
        });
        let permission: Permission = serde_json::from_value(raw).unwrap();
        assert_eq!(permission.status, PermissionStatus::Pending);
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
