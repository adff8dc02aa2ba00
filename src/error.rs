//! Error types for the enrichment pipeline.
//!
//! Two lower-level error families feed the top-level [`PipelineError`]:
//!
//! - [`CsvError`] - input parsing and output writing errors
//! - [`FetchError`] - asset download errors that are fatal to the run
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. HTTP error statuses
//! (4xx/5xx) are *not* errors here: the fetcher maps them to `None`
//! and the batch continues.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading the input CSV or writing the output CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The input file does not exist.
    #[error("The input file does not exist: {}", .0.display())]
    InputFileMissing(PathBuf),

    /// Failed to read or write a file.
    #[error("File IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid CSV content.
    #[error("Invalid CSV: {0}")]
    Parse(#[from] csv::Error),

    /// The input has no header row.
    #[error("CSV file is empty")]
    EmptyFile,
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Fatal errors from the asset fetcher.
///
/// These cover transport-level failures (DNS, refused connection,
/// timeout) and responses that are not valid JSON. A structured HTTP
/// error status is not a `FetchError`; it is reported as "no data".
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request could not complete.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("Invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        source: serde_json::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading/writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Fatal download error.
    #[error("Download error: {0}")]
    Fetch(#[from] FetchError),

    /// The designated URL column is absent from the input.
    #[error("The column '{0}' is not present in the input CSV file")]
    UrlColumnMissing(String),

    /// IO error outside CSV parsing (e.g. output cleanup).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
