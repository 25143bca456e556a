//! # Pyramids Gold Database Crate
//!
//! This crate is the shop's persistent archive. Every collection (ledger, staff,
//! partners, permissions, users, settings) lives under a well-known key as one
//! JSON document.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All storage details sit behind the `BlobStore` trait. The rest
//!   of the application only sees typed collections through `DbRepository`.
//! - **Whole-collection writes:** A mutation reads the collection, changes it and
//!   writes it back in one `put`. There are no partial updates.
//! - **Validate before apply:** A backup is parsed and type-checked in full
//!   before any key is overwritten.
//!
//! ## Public API
//!
//! - `BlobStore`, `MemoryBlobStore`, `FileBlobStore`: the key/value backends.
//! - `DbRepository`: typed access to every collection.
//! - `Backup`, `RestoreSummary`: the backup payload and what a restore applied.
//! - `DbError`: The specific error types that can be returned from this crate.

pub mod backup;
pub mod error;
pub mod keys;
pub mod repository;
pub mod store;

pub use backup::{backup_file_name, Backup, RestoreSummary};
pub use error::DbError;
pub use repository::DbRepository;
pub use store::{BlobStore, FileBlobStore, MemoryBlobStore};
