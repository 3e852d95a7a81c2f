//! Normalization of the sales extract.
//!
//! The pipeline runs six stages in a fixed order:
//! 1. **Region**: distinct region names
//! 2. **Country**: distinct (country, region) pairs, region resolved by lookup
//! 3. **Customer**: "First Last" customers with a resolvable country
//! 4. **ProductCategory**: distinct categories, first-seen description
//! 5. **Product**: distinct (name, category) products with a parseable price
//! 6. **OrderDetail**: one row per resolvable (customer, product, quantity, date)
//!
//! Each stage collects rows in memory, sorts them, and writes them in one
//! transaction. Lookups for later stages are read back from the committed
//! tables, never from in-memory state.

mod dimensions;
mod error;
mod facts;
mod pipeline;
mod writer;

pub use dimensions::{collect_categories, collect_countries, collect_regions};
pub use error::{NormalizeError, Result};
pub use facts::{collect_customers, collect_order_details, collect_products};
pub use pipeline::{NormalizationPipeline, run_pipeline};
pub use writer::{TableRow, persist};
