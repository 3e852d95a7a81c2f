//! Natural key to surrogate key indexes.
//!
//! An index is a snapshot of committed rows. Stages rebuild it from the
//! store right before use; it is never carried from one stage to the next.

use std::collections::HashMap;

use rusqlite::Connection;
use tracing::debug;

use sales_model::Table;

use crate::Store;
use crate::error::Result;

/// Which columns form the natural key of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupSpec {
    pub table: Table,
    /// Joined with a single space to form the key.
    pub key_columns: &'static [&'static str],
    pub id_column: &'static str,
}

impl LookupSpec {
    pub const REGION: Self = Self {
        table: Table::Region,
        key_columns: &["Region"],
        id_column: "RegionID",
    };
    pub const COUNTRY: Self = Self {
        table: Table::Country,
        key_columns: &["CountryName"],
        id_column: "CountryID",
    };
    /// Keyed by "First Last".
    pub const CUSTOMER: Self = Self {
        table: Table::Customer,
        key_columns: &["FirstName", "LastName"],
        id_column: "CustomerID",
    };
    pub const PRODUCT_CATEGORY: Self = Self {
        table: Table::ProductCategory,
        key_columns: &["ProductCategory"],
        id_column: "ProductCategoryID",
    };
    /// Keyed by product name alone; see [`LookupIndex::load`] for duplicates.
    pub const PRODUCT: Self = Self {
        table: Table::Product,
        key_columns: &["ProductName"],
        id_column: "ProductID",
    };

    fn select_sql(&self) -> String {
        format!(
            "SELECT {id}, {keys} FROM {table} ORDER BY {id}",
            id = self.id_column,
            keys = self.key_columns.join(", "),
            table = self.table.name(),
        )
    }
}

/// Mapping from natural key to surrogate key.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    entries: HashMap<String, i64>,
}

impl LookupIndex {
    /// Opens `store` read-only and reads every row of the lookup's table.
    pub fn build(store: &Store, spec: LookupSpec) -> Result<Self> {
        let connection = store.open_read_only()?;
        Self::load(&connection, spec)
    }

    /// Reads every row of the lookup's table on an open connection.
    ///
    /// Rows are read in key order; when two rows share a natural key the
    /// later (higher) surrogate key wins.
    pub fn load(connection: &Connection, spec: LookupSpec) -> Result<Self> {
        let mut statement = connection.prepare(&spec.select_sql())?;
        let width = spec.key_columns.len();
        let rows = statement.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let mut parts = Vec::with_capacity(width);
            for index in 0..width {
                parts.push(row.get::<_, String>(index + 1)?);
            }
            Ok((parts.join(" ").trim().to_string(), id))
        })?;

        let mut entries = HashMap::new();
        for row in rows {
            let (key, id) = row?;
            entries.insert(key, id);
        }
        debug!(table = %spec.table, entries = entries.len(), "built lookup index");
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Natural keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl FromIterator<(String, i64)> for LookupIndex {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recreate_table;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        for table in Table::PIPELINE_ORDER {
            recreate_table(&conn, table).unwrap();
        }
        conn
    }

    #[test]
    fn test_customer_keys_join_first_and_last() {
        let conn = memory_store();
        conn.execute_batch(
            "INSERT INTO Region (Region) VALUES ('Europe');
             INSERT INTO Country (CountryName, RegionID) VALUES ('France', 1);
             INSERT INTO Customer (FirstName, LastName, Address, City, CountryID)
                 VALUES ('Jane', 'Doe', '123 St', 'Paris', 1);",
        )
        .unwrap();

        let index = LookupIndex::load(&conn, LookupSpec::CUSTOMER).unwrap();
        assert_eq!(index.get("Jane Doe"), Some(1));
        assert_eq!(index.get("Jane"), None);
        assert_eq!(index.keys(), vec!["Jane Doe"]);
    }

    #[test]
    fn test_duplicate_names_resolve_to_last_row() {
        let conn = memory_store();
        conn.execute_batch(
            "INSERT INTO ProductCategory (ProductCategory, ProductCategoryDescription)
                 VALUES ('Tools', 'Hand tools'), ('Toys', 'Fun');
             INSERT INTO Product (ProductName, ProductUnitPrice, ProductCategoryID)
                 VALUES ('Widget', 9.99, 1), ('Widget', 4.5, 2);",
        )
        .unwrap();

        let index = LookupIndex::load(&conn, LookupSpec::PRODUCT).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Widget"), Some(2));
    }

    #[test]
    fn test_empty_table_gives_empty_index() {
        let conn = memory_store();
        let index = LookupIndex::load(&conn, LookupSpec::REGION).unwrap();
        assert!(index.is_empty());
    }
}
