//! Error types for hos-output.

use hos_core::CoreError;
use thiserror::Error;

/// Errors that can occur when saving or loading trip records.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored value could not be turned back into a domain type.
    #[error("corrupt record: {0}")]
    Corrupt(#[from] CoreError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
