//! Running queries against the store.

use std::fmt;
use std::time::Instant;

use rusqlite::params_from_iter;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use sales_store::Store;

use crate::error::Result;
use crate::query::Query;

/// One value of a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Cell {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value of an integer or real cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Integer(value) => Self::Integer(value),
            Value::Real(value) => Self::Real(value),
            Value::Text(value) => Self::Text(value),
            Value::Blob(value) => Self::Blob(value),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(value) => write!(f, "{value}"),
            // Whole reals print with one decimal.
            Self::Real(value) if value.fract() == 0.0 && value.is_finite() => {
                write!(f, "{value:.1}")
            }
            Self::Real(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Blob(value) => write!(f, "<{} bytes>", value.len()),
        }
    }
}

/// Column names plus rows, in the order the statement returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Values of the named column, one per row.
    pub fn column(&self, name: &str) -> Vec<&Cell> {
        match self.column_index(name) {
            Some(index) => self.rows.iter().filter_map(|row| row.get(index)).collect(),
            None => Vec::new(),
        }
    }
}

/// Runs a built [`Query`].
pub trait QueryExecutor {
    fn execute(&self, query: &Query) -> Result<ResultSet>;
}

/// Executes queries on a fresh read-only connection per call.
#[derive(Debug, Clone)]
pub struct SqliteExecutor {
    store: Store,
}

impl SqliteExecutor {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl QueryExecutor for SqliteExecutor {
    fn execute(&self, query: &Query) -> Result<ResultSet> {
        let span = info_span!("query", query = %query.label());
        let _guard = span.enter();
        let start = Instant::now();

        let connection = self.store.open_read_only()?;
        let mut statement = connection.prepare(query.sql())?;
        let columns: Vec<String> = statement
            .column_names()
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut rows = statement.query(params_from_iter(query.params()))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                cells.push(Cell::from(row.get::<_, Value>(index)?));
            }
            result.push(cells);
        }

        debug!(
            rows = result.len(),
            duration_ms = start.elapsed().as_millis(),
            "query complete"
        );
        Ok(ResultSet {
            columns,
            rows: result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_render_for_tables() {
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::Integer(3).to_string(), "3");
        assert_eq!(Cell::Real(7.0).to_string(), "7.0");
        assert_eq!(Cell::Real(29.97).to_string(), "29.97");
        assert_eq!(Cell::Text("Europe".to_string()).to_string(), "Europe");
    }

    #[test]
    fn test_cells_serialize_as_plain_json() {
        let set = ResultSet {
            columns: vec!["Name".to_string(), "Total".to_string()],
            rows: vec![vec![Cell::Text("Jane Doe".to_string()), Cell::Real(38.96)]],
        };
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["rows"][0][0], "Jane Doe");
        assert_eq!(json["rows"][0][1], 38.96);
    }
}
