//! Table definitions.

use rusqlite::{Connection, OptionalExtension};
use tracing::error;

use sales_model::Table;

use crate::error::{Result, StoreError};

/// `CREATE TABLE` statement for `table`.
pub fn create_statement(table: Table) -> &'static str {
    match table {
        Table::Region => {
            "CREATE TABLE Region (
                RegionID INTEGER PRIMARY KEY,
                Region TEXT NOT NULL UNIQUE
            )"
        }
        Table::Country => {
            "CREATE TABLE Country (
                CountryID INTEGER PRIMARY KEY,
                CountryName TEXT NOT NULL,
                RegionID INTEGER NOT NULL,
                FOREIGN KEY (RegionID) REFERENCES Region (RegionID)
            )"
        }
        Table::Customer => {
            "CREATE TABLE Customer (
                CustomerID INTEGER PRIMARY KEY,
                FirstName TEXT NOT NULL,
                LastName TEXT NOT NULL,
                Address TEXT NOT NULL,
                City TEXT NOT NULL,
                CountryID INTEGER NOT NULL,
                FOREIGN KEY (CountryID) REFERENCES Country (CountryID)
            )"
        }
        Table::ProductCategory => {
            "CREATE TABLE ProductCategory (
                ProductCategoryID INTEGER PRIMARY KEY,
                ProductCategory TEXT NOT NULL UNIQUE,
                ProductCategoryDescription TEXT NOT NULL
            )"
        }
        Table::Product => {
            "CREATE TABLE Product (
                ProductID INTEGER PRIMARY KEY,
                ProductName TEXT NOT NULL,
                ProductUnitPrice REAL NOT NULL,
                ProductCategoryID INTEGER NOT NULL,
                UNIQUE (ProductName, ProductCategoryID),
                FOREIGN KEY (ProductCategoryID) REFERENCES ProductCategory (ProductCategoryID)
            )"
        }
        Table::OrderDetail => {
            "CREATE TABLE OrderDetail (
                OrderID INTEGER PRIMARY KEY,
                CustomerID INTEGER NOT NULL,
                ProductID INTEGER NOT NULL,
                OrderDate TEXT NOT NULL,
                QuantityOrdered INTEGER NOT NULL,
                FOREIGN KEY (CustomerID) REFERENCES Customer (CustomerID),
                FOREIGN KEY (ProductID) REFERENCES Product (ProductID)
            )"
        }
    }
}

/// Drops `table` if present and creates it empty.
///
/// Failures are logged here and returned to the caller, which aborts the run.
pub fn recreate_table(connection: &Connection, table: Table) -> Result<()> {
    let drop = format!("DROP TABLE IF EXISTS {}", table.name());
    connection
        .execute_batch(&drop)
        .and_then(|()| connection.execute_batch(create_statement(table)))
        .map_err(|source| {
            error!(table = %table, error = %source, "failed to create table");
            StoreError::CreateTable { table, source }
        })
}

pub fn table_exists(connection: &Connection, table: Table) -> Result<bool> {
    let found = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table.name()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn row_count(connection: &Connection, table: Table) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    Ok(connection.query_row(&sql, [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recreate_empties_table() {
        let conn = Connection::open_in_memory().unwrap();
        recreate_table(&conn, Table::Region).unwrap();
        conn.execute("INSERT INTO Region (Region) VALUES ('Europe')", [])
            .unwrap();
        assert_eq!(row_count(&conn, Table::Region).unwrap(), 1);

        recreate_table(&conn, Table::Region).unwrap();
        assert_eq!(row_count(&conn, Table::Region).unwrap(), 0);
    }

    #[test]
    fn test_all_tables_create_in_pipeline_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        for table in Table::PIPELINE_ORDER {
            assert!(!table_exists(&conn, table).unwrap());
            recreate_table(&conn, table).unwrap();
            assert!(table_exists(&conn, table).unwrap());
        }
    }

    #[test]
    fn test_foreign_keys_are_enforced_when_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        recreate_table(&conn, Table::Region).unwrap();
        recreate_table(&conn, Table::Country).unwrap();

        let orphan = conn.execute(
            "INSERT INTO Country (CountryName, RegionID) VALUES ('France', 42)",
            [],
        );
        assert!(orphan.is_err());
    }
}
