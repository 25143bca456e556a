//! # Pyramids Gold Export
//!
//! Writes ledger listings as CSV files that open cleanly in spreadsheet tools with
//! right-to-left text: UTF-8 with a byte-order mark, a header row, one quoted value
//! per cell.

pub mod csv_writer;
pub mod error;
pub mod rows;

pub use csv_writer::{report_file_name, to_csv, write_csv_file, CsvQuoting, CsvRecord, BOM};
pub use error::ExportError;
pub use rows::StatementRow;
