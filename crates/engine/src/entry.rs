use crate::error::EngineError;
use chrono::NaiveDate;
use core_types::{new_id, CoreError, Employee, Permission, PermissionStatus, Settings, Transaction, TransactionType};
use pricing::validation::{ensure_karat, ensure_non_negative};
use pricing::{line_total, price_for_entry, PricingError};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

/// Default category for an expense entered without one.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "مصاريف أخرى";

/// A BUY, SELL or ANALYSIS as typed by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationEntry {
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub customer_name: Option<String>,
    pub description: Option<String>,
    pub weight: Option<Decimal>,
    pub karat: Option<Decimal>,
    /// Manual per-gram price for a trade, or the flat fee for an analysis.
    pub price_override: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub technician_id: Option<String>,
    /// Analysis only: `cast` or `raw`.
    pub ingot_type: Option<String>,
    pub is_paid: bool,
}

impl OperationEntry {
    /// A paid entry with every optional field empty.
    pub fn new(kind: TransactionType, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            customer_name: None,
            description: None,
            weight: None,
            karat: None,
            price_override: None,
            discount: None,
            technician_id: None,
            ingot_type: None,
            is_paid: true,
        }
    }

    /// Prices and validates the entry, producing the record to store.
    pub fn into_transaction(self, settings: &Settings) -> Result<Transaction, EngineError> {
        match self.kind {
            TransactionType::Buy | TransactionType::Sell => self.trade(settings),
            TransactionType::Analysis => self.analysis(),
            TransactionType::Expense => Err(EngineError::UnsupportedOperation(self.kind)),
        }
    }

    fn trade(self, settings: &Settings) -> Result<Transaction, EngineError> {
        let kind = self.kind;
        let weight = self.weight.ok_or_else(|| missing("weight", kind))?;
        let karat = ensure_karat(self.karat.ok_or_else(|| missing("karat", kind))?)?;
        let price = price_for_entry(settings, kind, Some(karat), self.price_override)?
            .ok_or_else(|| missing("price per gram", kind))?;
        let line = line_total(weight, price, self.discount)?;

        Ok(Transaction {
            id: new_id(),
            kind,
            date: self.date,
            customer_name: non_blank(self.customer_name),
            description: non_blank(self.description),
            weight: Some(weight),
            karat: Some(karat),
            price_per_gram: Some(price),
            total_amount: line.total,
            technician_id: non_blank(self.technician_id),
            is_paid: self.is_paid,
            discount: self.discount,
            details: None,
        })
    }

    fn analysis(self) -> Result<Transaction, EngineError> {
        let kind = self.kind;
        let fee = ensure_non_negative("fee", self.price_override.ok_or_else(|| missing("fee", kind))?)?;
        if let Some(weight) = self.weight {
            ensure_non_negative("weight", weight)?;
        }
        if let Some(karat) = self.karat {
            ensure_karat(karat)?;
        }

        let details = self.ingot_type.map(|ingot| {
            BTreeMap::from([("type".to_string(), Value::String(ingot))])
        });

        Ok(Transaction {
            id: new_id(),
            kind,
            date: self.date,
            customer_name: non_blank(self.customer_name),
            description: non_blank(self.description),
            weight: self.weight,
            karat: self.karat,
            price_per_gram: Some(fee),
            total_amount: fee,
            technician_id: non_blank(self.technician_id),
            is_paid: self.is_paid,
            discount: None,
            details,
        })
    }
}

/// An EXPENSE as typed by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub payee: Option<String>,
}

impl ExpenseEntry {
    pub fn into_transaction(self) -> Result<Transaction, EngineError> {
        let amount = ensure_non_negative("amount", self.amount)?;
        let category = if self.category.trim().is_empty() {
            DEFAULT_EXPENSE_CATEGORY.to_string()
        } else {
            self.category
        };

        Ok(Transaction {
            id: new_id(),
            kind: TransactionType::Expense,
            date: self.date,
            customer_name: non_blank(self.payee),
            description: non_blank(Some(self.description)),
            weight: None,
            karat: None,
            price_per_gram: None,
            total_amount: amount,
            technician_id: None,
            is_paid: true,
            discount: None,
            details: Some(BTreeMap::from([("category".to_string(), Value::String(category))])),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub code: String,
    pub job_title: String,
    pub phone: String,
    pub email: Option<String>,
}

impl NewEmployee {
    pub fn into_employee(self) -> Result<Employee, EngineError> {
        let name = required("name", self.name)?;
        let code = required("code", self.code)?;
        Ok(Employee {
            id: new_id(),
            name,
            code,
            job_title: self.job_title.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: non_blank(self.email),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    pub employee_id: String,
    pub date: NaiveDate,
    pub destination: String,
    pub items: String,
}

impl NewPermission {
    /// Issues the permission as PENDING, copying the employee's current name.
    pub fn issue(self, employee: &Employee) -> Result<Permission, EngineError> {
        Ok(Permission {
            id: new_id(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            date: self.date,
            destination: required("destination", self.destination)?,
            items: required("items", self.items)?,
            status: PermissionStatus::Pending,
        })
    }
}

fn missing(field: &'static str, kind: TransactionType) -> PricingError {
    PricingError::MissingField {
        field,
        kind: kind.to_string(),
    }
}

fn required(field: &str, value: String) -> Result<String, EngineError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(field.to_string(), "must not be empty".to_string()).into());
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn sell_is_priced_from_settings() {
        let mut entry = OperationEntry::new(TransactionType::Sell, date());
        entry.customer_name = Some("Hassan".to_string());
        entry.weight = Some(dec!(10));
        entry.karat = Some(dec!(875));
        entry.discount = Some(dec!(10));

        let tx = entry.into_transaction(&Settings::default()).unwrap();
        assert_eq!(tx.price_per_gram, Some(dec!(2762)));
        assert_eq!(tx.total_amount, dec!(24858));
        assert_eq!(tx.discount, Some(dec!(10)));
        assert!(tx.details.is_none());
    }

    #[test]
    fn trade_requires_weight_and_karat() {
        let mut entry = OperationEntry::new(TransactionType::Buy, date());
        entry.karat = Some(dec!(875));
        assert!(matches!(
            entry.clone().into_transaction(&Settings::default()),
            Err(EngineError::Pricing(PricingError::MissingField { field: "weight", .. }))
        ));

        entry.weight = Some(dec!(-2));
        assert!(matches!(
            entry.into_transaction(&Settings::default()),
            Err(EngineError::Pricing(PricingError::NegativeValue { field: "weight", .. }))
        ));
    }

    #[test]
    fn unpriced_buy_needs_a_manual_price() {
        let settings = Settings {
            gold_price24: Decimal::ZERO,
            ..Settings::default()
        };
        let mut entry = OperationEntry::new(TransactionType::Buy, date());
        entry.weight = Some(dec!(1));
        entry.karat = Some(dec!(875));
        assert!(matches!(
            entry.clone().into_transaction(&settings),
            Err(EngineError::Pricing(PricingError::NegativeValue { field: "price per gram", .. }))
        ));

        entry.price_override = Some(dec!(2500));
        let tx = entry.into_transaction(&settings).unwrap();
        assert_eq!(tx.total_amount, dec!(2500));
    }

    #[test]
    fn analysis_total_is_the_flat_fee() {
        let mut entry = OperationEntry::new(TransactionType::Analysis, date());
        entry.weight = Some(dec!(500));
        entry.price_override = Some(dec!(150));
        entry.discount = Some(dec!(50));
        entry.ingot_type = Some("cast".to_string());

        let tx = entry.into_transaction(&Settings::default()).unwrap();
        assert_eq!(tx.total_amount, dec!(150));
        assert_eq!(tx.weight, Some(dec!(500)));
        assert_eq!(tx.discount, None);
        assert_eq!(tx.details.unwrap()["type"], Value::String("cast".to_string()));
    }

    #[test]
    fn analysis_without_fee_is_rejected() {
        let entry = OperationEntry::new(TransactionType::Analysis, date());
        assert!(matches!(
            entry.into_transaction(&Settings::default()),
            Err(EngineError::Pricing(PricingError::MissingField { field: "fee", .. }))
        ));
    }

    #[test]
    fn expense_goes_through_its_own_entry() {
        let entry = OperationEntry::new(TransactionType::Expense, date());
        assert!(matches!(
            entry.into_transaction(&Settings::default()),
            Err(EngineError::UnsupportedOperation(TransactionType::Expense))
        ));

        let tx = ExpenseEntry {
            date: date(),
            description: "March rent".to_string(),
            amount: dec!(20000),
            category: "  ".to_string(),
            payee: None,
        }
        .into_transaction()
        .unwrap();
        assert_eq!(tx.kind, TransactionType::Expense);
        assert!(tx.is_paid);
        assert_eq!(
            tx.details.unwrap()["category"],
            Value::String(DEFAULT_EXPENSE_CATEGORY.to_string())
        );
    }

    #[test]
    fn permission_copies_employee_name() {
        let employee = NewEmployee {
            name: " Ahmed ".to_string(),
            code: "EMP001".to_string(),
            job_title: "Assayer".to_string(),
            phone: "0100000001".to_string(),
            email: Some(String::new()),
        }
        .into_employee()
        .unwrap();
        assert_eq!(employee.name, "Ahmed");
        assert_eq!(employee.email, None);

        let permission = NewPermission {
            employee_id: employee.id.clone(),
            date: date(),
            destination: "Assay office".to_string(),
            items: "3 ingots".to_string(),
        }
        .issue(&employee)
        .unwrap();
        assert_eq!(permission.employee_name, "Ahmed");
        assert_eq!(permission.status, PermissionStatus::Pending);
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let result = NewEmployee {
            name: "   ".to_string(),
            code: "EMP002".to_string(),
            job_title: String::new(),
            phone: String::new(),
            email: None,
        }
        .into_employee();
        assert!(matches!(result, Err(EngineError::Core(CoreError::InvalidInput(field, _))) if field == "name"));
    }
}
