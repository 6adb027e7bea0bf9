use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table file does not exist. Table loads treat this as an empty table.
    #[error("No such file: {}", .0.display())]
    MissingStore(PathBuf),

    #[error("Unexpected columns in {}: expected [{}], found [{}]", path.display(), expected.join(", "), found.join(", "))]
    SchemaMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Duplicate id detected: {0}")]
    DuplicateId(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
