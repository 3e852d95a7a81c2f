//! The six tables of the normalized store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// A table in the normalized store.
///
/// Variants are declared in pipeline order; each table is built by exactly
/// one stage and may only be built after its [`dependencies`](Self::dependencies)
/// have been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Table {
    Region,
    Country,
    Customer,
    ProductCategory,
    Product,
    OrderDetail,
}

impl Table {
    /// All tables in the order the pipeline builds them.
    pub const PIPELINE_ORDER: [Table; 6] = [
        Table::Region,
        Table::Country,
        Table::Customer,
        Table::ProductCategory,
        Table::Product,
        Table::OrderDetail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Country => "Country",
            Self::Customer => "Customer",
            Self::ProductCategory => "ProductCategory",
            Self::Product => "Product",
            Self::OrderDetail => "OrderDetail",
        }
    }

    /// Surrogate key column.
    pub fn id_column(self) -> &'static str {
        match self {
            Self::Region => "RegionID",
            Self::Country => "CountryID",
            Self::Customer => "CustomerID",
            Self::ProductCategory => "ProductCategoryID",
            Self::Product => "ProductID",
            Self::OrderDetail => "OrderID",
        }
    }

    /// Tables whose committed rows this table's stage reads.
    pub fn dependencies(self) -> &'static [Table] {
        match self {
            Self::Region | Self::ProductCategory => &[],
            Self::Country => &[Table::Region],
            Self::Customer => &[Table::Country],
            Self::Product => &[Table::ProductCategory],
            Self::OrderDetail => &[Table::Customer, Table::Product],
        }
    }

    /// Minimum number of tab-separated fields a source line needs for this stage.
    pub fn min_fields(self) -> usize {
        match self {
            Self::Region | Self::Country | Self::Customer => 5,
            Self::ProductCategory => 8,
            Self::Product => 9,
            Self::OrderDetail => 11,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Table::PIPELINE_ORDER
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ModelError::UnknownTable(value.to_string()))
    }
}
