//! Data model for the normalized sales store.
//!
//! - **table**: the six tables and their build order
//! - **rows**: row types written by the normalization stages
//! - **names**: customer name handling ("First Last" natural key)
//! - **config**: pipeline configuration
//! - **report**: per-stage skip diagnostics and run summaries

pub mod config;
pub mod error;
pub mod names;
pub mod report;
pub mod rows;
pub mod table;

pub use config::{DEFAULT_STORE_PATH, PipelineConfig};
pub use error::{ModelError, Result};
pub use names::CustomerName;
pub use report::{RunOutcome, RunSummary, SkipReason, StageReport};
pub use rows::{
    CountryRow, CustomerRow, OrderDetailRow, ProductCategoryRow, ProductRow, RegionRow,
};
pub use table::Table;
