//! # Pyramids Gold Partner Allocation
//!
//! Splits net profit across capital partners in proportion to what each one put in.
//!
//! Shares are recomputed from capital on every call. The `percentage` stored on a
//! `Partner` is never read, so adding or deleting a partner immediately rebalances
//! everyone else and the shares always sum to 100%.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{validate_capital, AllocationEngine};
pub use error::AllocationError;
pub use report::{AllocationReport, PartnerShare};
