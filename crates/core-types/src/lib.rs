//! # Pyramids Gold Core Types
//!
//! The plain records every other crate speaks: ledger transactions, shop settings,
//! partners, employees, transport permissions and users. This crate holds data and
//! the small parsing helpers around it; it performs no calculations.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{PermissionStatus, TransactionType, UserRole};
pub use error::CoreError;
pub use structs::{new_id, Employee, Partner, Permission, Settings, Transaction, User};
