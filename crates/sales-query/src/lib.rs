//! Analytical queries over the normalized sales store.
//!
//! Queries are built and executed in two separate steps. A builder returns a
//! [`Query`] (SQL text plus bound parameters) without reading any result
//! data; a [`QueryExecutor`] runs it and returns a [`ResultSet`]. Callers can
//! show the SQL next to its result or swap the executor in tests.
//!
//! # Example
//!
//! ```no_run
//! use sales_query::{QueryExecutor, QueryKind, SqliteExecutor, build};
//! use sales_store::Store;
//!
//! let store = Store::new("normalized.db");
//! let query = build(QueryKind::RegionTotals, &store, None)?;
//! let result = SqliteExecutor::new(store).execute(&query)?;
//! println!("{} regions", result.len());
//! # Ok::<(), sales_query::QueryError>(())
//! ```

mod browse;
mod catalog;
mod error;
mod executor;
mod library;
mod query;

pub use browse::{DEFAULT_PREVIEW_ROWS, adhoc, customer_names, preview_all, preview_table};
pub use catalog::QueryKind;
pub use error::{QueryError, Result};
pub use executor::{Cell, QueryExecutor, ResultSet, SqliteExecutor};
pub use library::{
    all_customers_ranked, build, countries_ranked_within_region, country_totals,
    customer_order_detail, customer_quarterly_totals, customer_total_spend,
    max_gap_between_orders, monthly_sales_ranking, region_totals, resolve_customer,
    top_country_per_region, top_customers_per_quarter,
};
pub use query::Query;
