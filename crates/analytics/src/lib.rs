//! # Pyramids Gold Analytics
//!
//! Derives the shop's figures from the raw ledger: how much pure gold is in stock
//! and what it is worth, and the profit waterfall from sales down to net profit
//! after tax.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no knowledge of storage. It depends only on `core-types`.
//! - **Stateless calculation:** `AnalyticsEngine` takes a ledger snapshot and
//!   returns fresh reports every call. Nothing is cached, so figures can never
//!   drift from the ledger.
//! - **Total over empty input:** an empty ledger yields zeroed reports, never an error.
//! - **Checked sums:** amounts restored from a backup are not range-checked, so every
//!   aggregate uses checked arithmetic and reports `AnalyticsError::Overflow`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the calculator.
//! - `InventoryReport`, `ProfitReport`, `Statement`: its outputs.
//! - `INCOME_TAX_RATE`, `VAT_RATE`: the fixed tax policy.

pub mod engine;
pub mod error;
pub mod inventory;
pub mod report;
pub mod statement;

pub use engine::{AnalyticsEngine, INCOME_TAX_RATE, VAT_RATE};
pub use error::AnalyticsError;
pub use inventory::pure_content;
pub use report::{InventoryReport, ProfitReport};
pub use statement::{Statement, StatementFilter};
