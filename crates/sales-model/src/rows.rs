//! Rows written by the normalization stages.
//!
//! Surrogate keys are not part of these types: SQLite assigns them in
//! insertion order, so a row's key is its position after the stage's sort.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionRow {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryRow {
    pub name: String,
    pub region_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategoryRow {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub name: String,
    pub unit_price: f64,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailRow {
    pub customer_id: i64,
    pub product_id: i64,
    pub order_date: NaiveDate,
    pub quantity: i64,
}

impl OrderDetailRow {
    /// ISO `YYYY-MM-DD` form stored in `OrderDetail.OrderDate`.
    pub fn order_date_iso(&self) -> String {
        self.order_date.format("%Y-%m-%d").to_string()
    }
}
