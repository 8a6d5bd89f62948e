//! Error module
//!
//! Defines the error type used by the file-facing layers of the crate using
//! `thiserror`. The codec itself never fails: decoding malformed text degrades
//! into best-effort fields and encoding is total. Errors only arise at the
//! collaborator boundary (files, streams, JSON input) and in the CLI.

use thiserror::Error;

/// The main error type for the line-csv library and binary.
///
/// # Error Categories
///
/// - **I/O errors**: failures reported by a line supplier or sink
/// - **Input errors**: JSON rows that cannot be encoded
/// - **Configuration errors**: invalid command-line argument combinations
/// - **Check failures**: a checked file contained problem lines
///
/// # Example
///
/// ```rust,ignore
/// use line_csv::error::LineCsvError;
///
/// fn example() -> Result<(), LineCsvError> {
///     // Errors from underlying types are automatically converted
///     let file = std::fs::File::open("nonexistent.csv")?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum LineCsvError {
    /// General I/O error raised by a line supplier or line sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    ///
    /// Raised when writing decoded rows as JSON fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of input could not be turned into a row.
    ///
    /// Used by the JSON encoder when an input line is not an array of strings.
    #[error("Line {line}: {reason}")]
    InvalidInput {
        /// 1-based line number in the input.
        line: u64,
        /// Human readable description of the problem.
        reason: String,
    },

    /// Invalid command-line argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The checker found problem lines.
    ///
    /// The report has already been printed; this error signals that the
    /// process should exit with a failure code.
    #[error("Check failed: {0}")]
    CheckFailed(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LineCsvError>;
