//! Error types for the normalization pipeline.

use thiserror::Error;

use sales_ingest::IngestError;
use sales_model::Table;
use sales_store::StoreError;

/// Errors that abort a pipeline run.
///
/// Malformed or unresolvable input never produces one of these; it is
/// counted in the stage report instead.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A stage failed while reading lookups or writing its table.
    #[error("stage {table} failed: {source}")]
    Stage {
        table: Table,
        #[source]
        source: StoreError,
    },

    /// A stage was asked to run before a table it reads was committed.
    #[error("stage {table} requires {missing} to be built first")]
    StageOrder { table: Table, missing: Table },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
