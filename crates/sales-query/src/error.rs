//! Error types for building and running queries.

use thiserror::Error;

use sales_store::StoreError;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The customer name is not in the Customer table.
    #[error("unknown customer: {name}")]
    UnknownCustomer { name: String },

    /// A customer-scoped query was requested without a customer name.
    #[error("query {query} requires a customer name")]
    MissingCustomer { query: &'static str },

    /// No catalogue entry has this name.
    #[error("unknown query: {name}")]
    UnknownQuery { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;
