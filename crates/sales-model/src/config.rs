//! Configuration for a normalization run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "normalized.db";

/// Inputs of the pipeline entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tab-separated source extract.
    pub source: PathBuf,
    /// SQLite file holding the normalized store.
    pub store: PathBuf,
    /// Rebuild even when the store file already exists.
    pub rebuild: bool,
}

impl PipelineConfig {
    pub fn new(source: impl Into<PathBuf>, store: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            store: store.into(),
            rebuild: true,
        }
    }

    #[must_use]
    pub fn with_rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = rebuild;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn store(&self) -> &Path {
        &self.store
    }
}
