//! Queries outside the catalogue: customer listing, table previews, ad-hoc SQL.

use sales_model::Table;
use sales_store::{LookupIndex, LookupSpec, Store};

use crate::error::Result;
use crate::query::Query;

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Distinct "First Last" customer names, sorted.
pub fn customer_names(store: &Store) -> Result<Vec<String>> {
    let customers = LookupIndex::build(store, LookupSpec::CUSTOMER)?;
    Ok(customers.keys().into_iter().map(str::to_string).collect())
}

/// The first `limit` rows of `table` by surrogate key.
pub fn preview_table(table: Table, limit: usize) -> Query {
    let sql = format!(
        "SELECT * FROM {} ORDER BY {} LIMIT ?1",
        table.name(),
        table.id_column()
    );
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    Query::named(table.name(), sql).bind(limit)
}

/// Previews of all six tables in pipeline order.
pub fn preview_all(limit: usize) -> Vec<Query> {
    Table::PIPELINE_ORDER
        .into_iter()
        .map(|table| preview_table(table, limit))
        .collect()
}

/// Caller-supplied SQL.
///
/// Executors open the store read-only, so statements that write fail
/// instead of touching the stored tables.
pub fn adhoc(sql: &str) -> Query {
    Query::named("sql", sql.trim())
}
