//! Terminal tables for run summaries, query results, and checks.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sales_model::{RunOutcome, RunSummary, StageReport};
use sales_query::{Cell as ResultCell, QueryKind, ResultSet};
use sales_store::OrphanCount;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per stage with rows written and skip counts by reason.
pub fn stage_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows"),
        header_cell("Skipped"),
        header_cell("Reasons"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for stage in &summary.stages {
        table.add_row(vec![
            Cell::new(stage.table.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.rows_written),
            count_cell(stage.skipped_total(), Color::Yellow),
            reasons_cell(stage),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.rows_written()).add_attribute(Attribute::Bold),
        count_cell(summary.skipped_total(), Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

/// Line printed above the stage table.
pub fn outcome_line(summary: &RunSummary) -> String {
    let outcome = match summary.outcome {
        RunOutcome::Rebuilt => "rebuilt",
        RunOutcome::Reused => "reused (--no-rebuild)",
    };
    match &summary.digest {
        Some(digest) => format!("Store {outcome}, digest {digest}"),
        None => format!("Store {outcome}"),
    }
}

/// Column names as the header, one row per result row. Numbers align right.
pub fn result_table(result: &ResultSet) -> Table {
    let mut table = Table::new();
    table.set_header(result.columns.iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);

    for row in &result.rows {
        table.add_row(row.iter().map(value_cell));
    }
    if let Some(first) = result.rows.first() {
        for (index, cell) in first.iter().enumerate() {
            if matches!(cell, ResultCell::Integer(_) | ResultCell::Real(_)) {
                align_column(&mut table, index, CellAlignment::Right);
            }
        }
    }
    table
}

pub fn catalog_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Description"),
        header_cell("Customer"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);

    for kind in QueryKind::ALL {
        let customer = if kind.needs_customer() {
            Cell::new("required").fg(Color::Yellow)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(kind.name()).fg(Color::Blue),
            Cell::new(kind.title()),
            customer,
        ]);
    }
    table
}

pub fn orphan_table(counts: &[OrphanCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Foreign key"), header_cell("Orphans")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for count in counts {
        let orphans = usize::try_from(count.orphans).unwrap_or(usize::MAX);
        table.add_row(vec![
            Cell::new(count.foreign_key.label()),
            count_cell(orphans, Color::Red),
        ]);
    }
    table
}

fn reasons_cell(stage: &StageReport) -> Cell {
    if stage.skipped.is_empty() {
        return dim_cell("-");
    }
    let reasons: Vec<String> = stage
        .skipped
        .iter()
        .map(|(reason, count)| format!("{reason}: {count}"))
        .collect();
    Cell::new(reasons.join(", "))
}

fn value_cell(value: &ResultCell) -> Cell {
    match value {
        ResultCell::Null => dim_cell("NULL"),
        other => Cell::new(other),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
