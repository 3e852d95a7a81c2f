//! Sales extract ingestion.
//!
//! This crate turns the flat, tab-separated sales extract into
//! [`RawRecord`]s that the normalization stages consume.
//!
//! # Features
//!
//! - **Reading**: header-skipping, whitespace-trimming, tolerant of short lines
//! - **List fields**: positional zip of the semicolon-delimited product columns
//! - **Values**: price, quantity and `YYYYMMDD` date parsing that never panics
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sales_ingest::{read_extract, Column};
//!
//! let records = read_extract(Path::new("data.tsv"))?;
//! for record in &records {
//!     if let Some(region) = record.field(Column::Region) {
//!         println!("{region}");
//!     }
//! }
//! ```

mod error;
mod reader;
mod record;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use reader::{read_extract, read_extract_from};

// === Records ===
pub use record::{CategoryItem, Column, OrderItem, ProductItem, RawRecord};

// === Values ===
pub use values::{parse_order_date, parse_quantity, parse_unit_price};
