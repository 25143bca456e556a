use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("There is no data to export.")]
    NoData,

    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to finish CSV buffer: {0}")]
    Buffer(String),

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
