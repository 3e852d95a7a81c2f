//! Error types for extract ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an extract from being read at all.
///
/// Malformed lines are not errors: they are returned as short
/// [`RawRecord`](crate::RawRecord)s and skipped by the stages.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extract file does not exist.
    #[error("extract file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the extract file.
    #[error("failed to read extract {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tab-separated reader rejected the input (e.g. invalid UTF-8).
    #[error("failed to decode extract {path} near line {line}: {source}")]
    Decode {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
