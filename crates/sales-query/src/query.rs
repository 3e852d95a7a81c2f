//! Query value objects.
//!
//! Building a query never touches result data: it produces SQL text and the
//! values bound to its placeholders. Running it is the job of a
//! [`QueryExecutor`](crate::QueryExecutor).

use rusqlite::types::Value;

use crate::catalog::QueryKind;

/// SQL text plus positional parameters (`?1`, `?2`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    label: String,
    sql: String,
    params: Vec<Value>,
}

impl Query {
    /// A catalogue query.
    pub fn catalog(kind: QueryKind, sql: impl Into<String>) -> Self {
        Self {
            label: kind.name().to_string(),
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// A query outside the catalogue, e.g. a table preview.
    pub fn named(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}
