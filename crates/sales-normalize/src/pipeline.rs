//! Stage orchestration and the pipeline entry point.

use std::time::Instant;

use tracing::{debug, info, info_span};

use sales_ingest::{RawRecord, read_extract};
use sales_model::{PipelineConfig, RunOutcome, RunSummary, StageReport, Table};
use sales_store::{LookupIndex, LookupSpec, Store, StoreError, store_digest, table_exists};

use crate::dimensions::{collect_categories, collect_countries, collect_regions};
use crate::error::{NormalizeError, Result};
use crate::facts::{collect_customers, collect_order_details, collect_products};
use crate::writer::{TableRow, persist};

/// The six stages over one parsed extract and one store.
#[derive(Debug)]
pub struct NormalizationPipeline {
    store: Store,
    records: Vec<RawRecord>,
}

impl NormalizationPipeline {
    pub fn new(store: Store, records: Vec<RawRecord>) -> Self {
        Self { store, records }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs every stage in [`Table::PIPELINE_ORDER`]. The first failing
    /// stage aborts the run; tables committed before it stay on disk.
    pub fn run(&self) -> Result<Vec<StageReport>> {
        Table::PIPELINE_ORDER
            .into_iter()
            .map(|table| self.run_stage(table))
            .collect()
    }

    /// Builds and commits one table.
    ///
    /// Fails with [`NormalizeError::StageOrder`] if a table this stage reads
    /// has not been committed yet.
    pub fn run_stage(&self, table: Table) -> Result<StageReport> {
        let span = info_span!("stage", table = %table);
        let _guard = span.enter();
        let start = Instant::now();

        self.check_dependencies(table)?;

        let mut report = StageReport::new(table);
        let written = self
            .build(table, &mut report)
            .map_err(|source| NormalizeError::Stage { table, source })?;
        report.rows_written = written;

        info!(
            table = %table,
            rows_written = report.rows_written,
            skipped = report.skipped_total(),
            duration_ms = start.elapsed().as_millis(),
            "stage complete"
        );
        Ok(report)
    }

    fn check_dependencies(&self, table: Table) -> Result<()> {
        let dependencies = table.dependencies();
        if dependencies.is_empty() {
            return Ok(());
        }
        let missing_store = || NormalizeError::StageOrder {
            table,
            missing: dependencies[0],
        };
        if !self.store.exists() {
            return Err(missing_store());
        }
        let connection = self
            .store
            .open_read_only()
            .map_err(|source| NormalizeError::Stage { table, source })?;
        for &dependency in dependencies {
            let committed = table_exists(&connection, dependency)
                .map_err(|source| NormalizeError::Stage { table, source })?;
            if !committed {
                return Err(NormalizeError::StageOrder {
                    table,
                    missing: dependency,
                });
            }
        }
        Ok(())
    }

    fn build(&self, table: Table, report: &mut StageReport) -> sales_store::Result<usize> {
        let records = &self.records;
        match table {
            Table::Region => self.write(&collect_regions(records, report)),
            Table::Country => {
                let regions = self.lookup(LookupSpec::REGION)?;
                self.write(&collect_countries(records, &regions, report))
            }
            Table::Customer => {
                let countries = self.lookup(LookupSpec::COUNTRY)?;
                self.write(&collect_customers(records, &countries, report))
            }
            Table::ProductCategory => self.write(&collect_categories(records, report)),
            Table::Product => {
                let categories = self.lookup(LookupSpec::PRODUCT_CATEGORY)?;
                self.write(&collect_products(records, &categories, report))
            }
            Table::OrderDetail => {
                let customers = self.lookup(LookupSpec::CUSTOMER)?;
                let products = self.lookup(LookupSpec::PRODUCT)?;
                self.write(&collect_order_details(
                    records, &customers, &products, report,
                ))
            }
        }
    }

    fn lookup(&self, spec: LookupSpec) -> sales_store::Result<LookupIndex> {
        LookupIndex::build(&self.store, spec)
    }

    fn write<R: TableRow>(&self, rows: &[R]) -> sales_store::Result<usize> {
        persist(&self.store, rows)
    }
}

/// Builds the normalized store described by `config`.
///
/// With `rebuild` off and a store already on disk, nothing is read or
/// written and the summary reports [`RunOutcome::Reused`]. Otherwise the
/// extract is read first, then the old store is removed and all six tables
/// are rebuilt.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary> {
    let store = Store::new(config.store());
    let span = info_span!("normalize", store = %store.path().display());
    let _guard = span.enter();

    if !config.rebuild && store.exists() {
        info!("store exists and rebuild not requested; reusing it");
        let digest = digest_of(&store)?;
        return Ok(RunSummary {
            outcome: RunOutcome::Reused,
            stages: Vec::new(),
            digest: Some(digest),
        });
    }

    let start = Instant::now();
    let records = info_span!("ingest", source = %config.source().display())
        .in_scope(|| read_extract(config.source()))?;
    debug!(records = records.len(), "extract read");

    store.remove()?;
    let pipeline = NormalizationPipeline::new(store, records);
    let stages = pipeline.run()?;
    let digest = digest_of(pipeline.store())?;

    let summary = RunSummary {
        outcome: RunOutcome::Rebuilt,
        stages,
        digest: Some(digest),
    };
    info!(
        rows_written = summary.rows_written(),
        skipped = summary.skipped_total(),
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );
    Ok(summary)
}

fn digest_of(store: &Store) -> std::result::Result<String, StoreError> {
    let connection = store.open_read_only()?;
    store_digest(&connection)
}
