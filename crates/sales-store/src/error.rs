//! Error types for store access.

use std::path::PathBuf;
use thiserror::Error;

use sales_model::Table;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be opened or created.
    #[error("failed to open store {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A read-only open was requested for a store that was never built.
    #[error("store not found: {path} (run the normalization pipeline first)")]
    Missing { path: PathBuf },

    /// Removing a previous store file failed.
    #[error("failed to remove store {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating a table failed.
    #[error("failed to create table {table}: {source}")]
    CreateTable {
        table: Table,
        #[source]
        source: rusqlite::Error,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
