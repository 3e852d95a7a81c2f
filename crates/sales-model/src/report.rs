//! Diagnostics collected while normalizing.
//!
//! Skips never fail a run. They are counted per stage so callers can see
//! how much of the extract was dropped and why.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Table;

/// Why a line or list element did not produce a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer tab-separated fields than the stage needs.
    ShortLine,
    /// A required field is empty.
    MissingValue,
    /// Customer name without a space to split on.
    NameWithoutSpace,
    UnknownRegion,
    UnknownCountry,
    UnknownCategory,
    UnknownCustomer,
    UnknownProduct,
    InvalidPrice,
    InvalidQuantity,
    InvalidDate,
}

impl SkipReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::ShortLine => "short line",
            Self::MissingValue => "missing value",
            Self::NameWithoutSpace => "name without space",
            Self::UnknownRegion => "unknown region",
            Self::UnknownCountry => "unknown country",
            Self::UnknownCategory => "unknown category",
            Self::UnknownCustomer => "unknown customer",
            Self::UnknownProduct => "unknown product",
            Self::InvalidPrice => "invalid price",
            Self::InvalidQuantity => "invalid quantity",
            Self::InvalidDate => "invalid date",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub table: Table,
    pub rows_written: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl StageReport {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            rows_written: 0,
            skipped: BTreeMap::new(),
        }
    }

    pub fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    /// The store was dropped and rebuilt from the extract.
    Rebuilt,
    /// The store already existed and rebuilding was not requested.
    Reused,
}

/// Result of the pipeline entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub stages: Vec<StageReport>,
    /// SHA-256 over every stored row, hex encoded.
    pub digest: Option<String>,
}

impl RunSummary {
    pub fn stage(&self, table: Table) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.table == table)
    }

    pub fn rows_written(&self) -> usize {
        self.stages.iter().map(|report| report.rows_written).sum()
    }

    pub fn skipped_total(&self) -> usize {
        self.stages.iter().map(StageReport::skipped_total).sum()
    }
}
