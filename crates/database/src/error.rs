use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {collection} record with id '{id}'.")]
    NotFound { collection: &'static str, id: String },

    #[error("A {collection} record with id '{id}' already exists.")]
    Duplicate { collection: &'static str, id: String },
}
