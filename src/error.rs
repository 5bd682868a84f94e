//! Error types for the postal-code importer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that can occur during an import run.
///
/// Every variant is terminal for the run; nothing is retried.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Underlying filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error outside of schema setup and loading
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The source CSV is not where the configuration says it is
    #[error(
        "CSV file not found at {}. Please download `utf_ken_all.csv` from the Japan Post website and place it in {}",
        .path.display(),
        .dir.display()
    )]
    MissingInput { path: PathBuf, dir: PathBuf },

    /// The destination database could not be removed, created or its schema
    /// set up
    #[error("Error opening database {}: {}", .path.display(), .source)]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: SinkCause,
    },

    /// The input byte stream could not be decoded
    #[error("CSV parsing error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Loading failed and the transaction was rolled back
    #[error("Import aborted, {rows} uncommitted rows rolled back: {source}")]
    LoadAborted {
        rows: u64,
        #[source]
        source: Box<ImportError>,
    },
}

/// Underlying failure behind `ImportError::SinkOpen`.
#[derive(Error, Debug)]
pub enum SinkCause {
    /// The previous database file could not be removed
    #[error("cannot remove existing file: {0}")]
    Remove(#[from] std::io::Error),

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl ImportError {
    /// Converts a `csv` decode error into a `Parse` error, keeping the line.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ImportError::Parse {
            line,
            message: err.to_string(),
        }
    }
}
