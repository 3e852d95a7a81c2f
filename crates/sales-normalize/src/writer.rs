//! Writing collected rows to the store.

use rusqlite::{Statement, params};
use tracing::debug;

use sales_model::{
    CountryRow, CustomerRow, OrderDetailRow, ProductCategoryRow, ProductRow, RegionRow, Table,
};
use sales_store::{Store, recreate_table};

/// A row type with a fixed destination table.
pub trait TableRow {
    const TABLE: Table;
    /// Parameterized `INSERT` without the surrogate key column.
    const INSERT: &'static str;

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

impl TableRow for RegionRow {
    const TABLE: Table = Table::Region;
    const INSERT: &'static str = "INSERT INTO Region (Region) VALUES (?1)";

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize> {
        statement.execute(params![self.name])
    }
}

impl TableRow for CountryRow {
    const TABLE: Table = Table::Country;
    const INSERT: &'static str = "INSERT INTO Country (CountryName, RegionID) VALUES (?1, ?2)";

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize> {
        statement.execute(params![self.name, self.region_id])
    }
}

impl TableRow for CustomerRow {
    const TABLE: Table = Table::Customer;
    const INSERT: &'static str = "INSERT INTO Customer (FirstName, LastName, Address, City, CountryID) \
         VALUES (?1, ?2, ?3, ?4, ?5)";

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize> {
        statement.execute(params![
            self.first_name,
            self.last_name,
            self.address,
            self.city,
            self.country_id
        ])
    }
}

impl TableRow for ProductCategoryRow {
    const TABLE: Table = Table::ProductCategory;
    const INSERT: &'static str =
        "INSERT INTO ProductCategory (ProductCategory, ProductCategoryDescription) VALUES (?1, ?2)";

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize> {
        statement.execute(params![self.name, self.description])
    }
}

impl TableRow for ProductRow {
    const TABLE: Table = Table::Product;
    const INSERT: &'static str = "INSERT INTO Product (ProductName, ProductUnitPrice, ProductCategoryID) \
         VALUES (?1, ?2, ?3)";

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize> {
        statement.execute(params![self.name, self.unit_price, self.category_id])
    }
}

impl TableRow for OrderDetailRow {
    const TABLE: Table = Table::OrderDetail;
    const INSERT: &'static str = "INSERT INTO OrderDetail (CustomerID, ProductID, OrderDate, QuantityOrdered) \
         VALUES (?1, ?2, ?3, ?4)";

    fn insert(&self, statement: &mut Statement<'_>) -> rusqlite::Result<usize> {
        statement.execute(params![
            self.customer_id,
            self.product_id,
            self.order_date_iso(),
            self.quantity
        ])
    }
}

/// Recreates the row type's table and inserts `rows` in order in a single
/// transaction. Returns the number of rows written.
///
/// Surrogate keys follow slice order, starting at 1.
pub fn persist<R: TableRow>(store: &Store, rows: &[R]) -> sales_store::Result<usize> {
    let mut connection = store.open()?;
    recreate_table(&connection, R::TABLE)?;

    let transaction = connection.transaction()?;
    let mut written = 0;
    {
        let mut statement = transaction.prepare(R::INSERT)?;
        for row in rows {
            written += row.insert(&mut statement)?;
        }
    }
    transaction.commit()?;
    debug!(table = %R::TABLE, rows = written, "committed table");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_store::row_count;

    #[test]
    fn test_persist_replaces_previous_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("normalized.db"));
        let rows = vec![
            RegionRow {
                name: "Europe".to_string(),
            },
            RegionRow {
                name: "Asia".to_string(),
            },
        ];

        assert_eq!(persist(&store, &rows).unwrap(), 2);
        assert_eq!(persist(&store, &rows[..1]).unwrap(), 1);

        let conn = store.open_read_only().unwrap();
        assert_eq!(row_count(&conn, Table::Region).unwrap(), 1);
        let id: i64 = conn
            .query_row("SELECT RegionID FROM Region WHERE Region = 'Europe'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_order_dates_are_stored_as_iso_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("normalized.db"));
        let conn = store.open().unwrap();
        for table in Table::PIPELINE_ORDER {
            recreate_table(&conn, table).unwrap();
        }
        conn.execute_batch(
            "INSERT INTO Region (Region) VALUES ('Europe');
             INSERT INTO Country (CountryName, RegionID) VALUES ('France', 1);
             INSERT INTO Customer (FirstName, LastName, Address, City, CountryID)
                 VALUES ('Jane', 'Doe', '1 St', 'Paris', 1);
             INSERT INTO ProductCategory (ProductCategory, ProductCategoryDescription)
                 VALUES ('Tools', 'Hand tools');
             INSERT INTO Product (ProductName, ProductUnitPrice, ProductCategoryID)
                 VALUES ('Widget', 9.99, 1);",
        )
        .unwrap();
        drop(conn);

        let rows = vec![OrderDetailRow {
            customer_id: 1,
            product_id: 1,
            order_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            quantity: 2,
        }];
        persist(&store, &rows).unwrap();

        let conn = store.open_read_only().unwrap();
        let date: String = conn
            .query_row("SELECT OrderDate FROM OrderDetail", [], |row| row.get(0))
            .unwrap();
        assert_eq!(date, "2020-01-15");
    }
}
