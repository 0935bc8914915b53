//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while reading and joining the metadata corpus
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A CSV record couldn't be read
    ///
    /// `line` is 0 when the reader could not report a position
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// The corpus failed a sanity check (e.g. nothing survived the join)
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
