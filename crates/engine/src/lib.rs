//! # Pyramids Gold Engine
//!
//! The orchestrator that wires the store, the calculators and the exporters into
//! the shop's operations.
//!
//! ## Architectural Principles
//!
//! - **Injected storage:** `ShopEngine` is generic over a `BlobStore`. The CLI
//!   runs it on files; tests run it in memory.
//! - **Validate, then write:** An entry is priced and checked in full before the
//!   ledger is touched. A rejected entry leaves no trace.
//! - **Snapshot reads:** Every report is computed from the collections as stored
//!   at call time. Nothing is cached between calls.
//!
//! ## Public API
//!
//! - `ShopEngine`: every shop operation.
//! - `OperationEntry`, `ExpenseEntry`, `NewEmployee`, `NewPermission`: operator input.
//! - `Dashboard`: the front-page snapshot.
//! - `EngineError`: wraps the errors of every other crate.

pub mod entry;
pub mod error;
pub mod shop;

pub use entry::{ExpenseEntry, NewEmployee, NewPermission, OperationEntry, DEFAULT_EXPENSE_CATEGORY};
pub use error::EngineError;
pub use shop::{Dashboard, ShopEngine, RECENT_LIMIT};
