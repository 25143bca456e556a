use crate::error::ExportError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// UTF-8 byte-order mark. Spreadsheet tools need it to detect the encoding of Arabic text.
pub const BOM: char = '\u{FEFF}';

/// How cell values are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Every value wrapped in `"` as is. An embedded quote produces a malformed cell,
    /// matching files the shop has already exported.
    #[default]
    Verbatim,
    /// RFC 4180: every value quoted, embedded quotes doubled.
    Escaped,
}

/// A type that can be laid out as one CSV line.
pub trait CsvRecord {
    /// Column names, in order. Written unquoted on the header line.
    fn headers() -> Vec<&'static str>;
    /// Cell values, in the same order as [`CsvRecord::headers`].
    fn values(&self) -> Vec<String>;
}

/// Renders `records` as a CSV document, BOM included.
///
/// Lines are separated by `\n` with no trailing newline.
pub fn to_csv<R: CsvRecord>(records: &[R], quoting: CsvQuoting) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let headers = R::headers().join(",");
    let body = match quoting {
        CsvQuoting::Verbatim => verbatim_body(records),
        CsvQuoting::Escaped => escaped_body(records)?,
    };

    tracing::debug!(rows = records.len(), ?quoting, "Rendered CSV export.");
    Ok(format!("{BOM}{headers}\n{body}"))
}

fn verbatim_body<R: CsvRecord>(records: &[R]) -> String {
    records
        .iter()
        .map(|record| {
            record
                .values()
                .iter()
                .map(|value| format!("\"{value}\""))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escaped_body<R: CsvRecord>(records: &[R]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record.values())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// `PyramidsGold_Report_<FILTER>_<YYYY-MM-DD>.csv`
pub fn report_file_name(filter: &str, date: NaiveDate) -> String {
    format!("PyramidsGold_Report_{filter}_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes a rendered document to `path`, replacing any existing file.
pub fn write_csv_file(path: &Path, document: &str) -> Result<(), ExportError> {
    std::fs::write(path, document)?;
    tracing::info!(path = %path.display(), bytes = document.len(), "Wrote CSV export.");
    Ok(())
}
