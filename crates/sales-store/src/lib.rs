//! The normalized sales store.
//!
//! A [`Store`] is only a path. Every pipeline stage and every query
//! execution opens its own connection and closes it when done; nothing
//! holds a connection across stages.
//!
//! - **schema**: DDL for the six tables, drop-and-recreate
//! - **lookup**: natural key to surrogate key indexes read from committed rows
//! - **integrity**: orphan counts for every foreign key
//! - **digest**: SHA-256 fingerprint of the stored rows

mod digest;
mod error;
mod integrity;
mod lookup;
mod schema;
mod store;

pub use digest::store_digest;
pub use error::{Result, StoreError};
pub use integrity::{FOREIGN_KEYS, ForeignKey, OrphanCount, orphan_counts};
pub use lookup::{LookupIndex, LookupSpec};
pub use schema::{create_statement, recreate_table, row_count, table_exists};
pub use store::Store;
