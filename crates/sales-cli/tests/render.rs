//! Rendering of run summaries and query results.

use std::collections::BTreeMap;

use sales_cli::render::{catalog_table, orphan_table, outcome_line, result_table, stage_table};
use sales_model::{RunOutcome, RunSummary, SkipReason, StageReport, Table};
use sales_query::{Cell, ResultSet};
use sales_store::{FOREIGN_KEYS, OrphanCount};

fn summary() -> RunSummary {
    let mut customer = StageReport::new(Table::Customer);
    customer.rows_written = 2;
    customer.skip(SkipReason::NameWithoutSpace);
    customer.skip(SkipReason::UnknownCountry);
    customer.skip(SkipReason::UnknownCountry);
    RunSummary {
        outcome: RunOutcome::Rebuilt,
        stages: vec![
            StageReport {
                table: Table::Region,
                rows_written: 2,
                skipped: BTreeMap::new(),
            },
            customer,
        ],
        digest: Some("ab12".to_string()),
    }
}

#[test]
fn test_stage_table_lists_reasons_and_totals() {
    let mut table = stage_table(&summary());
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("Region"));
    assert!(rendered.contains("name without space: 1, unknown country: 2"));
    assert!(rendered.contains("TOTAL"));
    assert_eq!(table.row_iter().count(), 3);
}

#[test]
fn test_outcome_line_mentions_digest() {
    insta::assert_snapshot!(outcome_line(&summary()), @"Store rebuilt, digest ab12");

    let reused = RunSummary {
        outcome: RunOutcome::Reused,
        stages: Vec::new(),
        digest: None,
    };
    insta::assert_snapshot!(outcome_line(&reused), @"Store reused (--no-rebuild)");
}

#[test]
fn test_result_table_uses_column_names() {
    let result = ResultSet {
        columns: vec!["Region".to_string(), "Total".to_string()],
        rows: vec![
            vec![Cell::Text("Europe".to_string()), Cell::Real(90.0)],
            vec![Cell::Text("Asia".to_string()), Cell::Null],
        ],
    };
    let mut table = result_table(&result);
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("Region"));
    assert!(rendered.contains("90.0"));
    assert!(rendered.contains("NULL"));
    assert_eq!(table.row_iter().count(), 2);
}

#[test]
fn test_catalog_lists_every_query() {
    let table = catalog_table();
    assert_eq!(table.row_iter().count(), 11);
}

#[test]
fn test_orphan_table_has_one_row_per_foreign_key() {
    let counts: Vec<OrphanCount> = FOREIGN_KEYS
        .iter()
        .map(|foreign_key| OrphanCount {
            foreign_key: *foreign_key,
            orphans: 0,
        })
        .collect();
    let mut table = orphan_table(&counts);
    table.force_no_tty();

    assert_eq!(table.row_iter().count(), FOREIGN_KEYS.len());
    assert!(table.to_string().contains("OrderDetail.ProductID -> Product.ProductID"));
}
