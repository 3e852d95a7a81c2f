//! Referential integrity checks.

use rusqlite::Connection;

use sales_model::Table;

use crate::error::Result;

/// A declared foreign key: `child.column` references `parent`'s surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub child: Table,
    pub column: &'static str,
    pub parent: Table,
}

impl ForeignKey {
    pub fn label(&self) -> String {
        format!(
            "{}.{} -> {}.{}",
            self.child,
            self.column,
            self.parent,
            self.parent.id_column()
        )
    }

    fn orphan_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {child} AS c \
             LEFT JOIN {parent} AS p ON c.{column} = p.{parent_id} \
             WHERE p.{parent_id} IS NULL",
            child = self.child.name(),
            parent = self.parent.name(),
            column = self.column,
            parent_id = self.parent.id_column(),
        )
    }
}

pub const FOREIGN_KEYS: [ForeignKey; 5] = [
    ForeignKey {
        child: Table::Country,
        column: "RegionID",
        parent: Table::Region,
    },
    ForeignKey {
        child: Table::Customer,
        column: "CountryID",
        parent: Table::Country,
    },
    ForeignKey {
        child: Table::Product,
        column: "ProductCategoryID",
        parent: Table::ProductCategory,
    },
    ForeignKey {
        child: Table::OrderDetail,
        column: "CustomerID",
        parent: Table::Customer,
    },
    ForeignKey {
        child: Table::OrderDetail,
        column: "ProductID",
        parent: Table::Product,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanCount {
    pub foreign_key: ForeignKey,
    pub orphans: i64,
}

/// Counts child rows whose foreign key has no matching parent row.
pub fn orphan_counts(connection: &Connection) -> Result<Vec<OrphanCount>> {
    FOREIGN_KEYS
        .iter()
        .map(|foreign_key| -> Result<OrphanCount> {
            let orphans = connection.query_row(&foreign_key.orphan_sql(), [], |row| row.get(0))?;
            Ok(OrphanCount {
                foreign_key: *foreign_key,
                orphans,
            })
        })
        .collect()
}
