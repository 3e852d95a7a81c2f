use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Handle to the SQLite file holding the normalized tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Opens a read-write connection, creating the file if needed.
    ///
    /// Foreign-key enforcement is off by default in SQLite and is switched
    /// on for every connection.
    pub fn open(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(&self.path, flags).map_err(|source| {
            StoreError::Open {
                path: self.path.clone(),
                source,
            }
        })?;
        connection.execute_batch("PRAGMA foreign_keys = ON;")?;
        debug!(path = %self.path.display(), "opened store read-write");
        Ok(connection)
    }

    /// Opens a read-only connection. Statements that write fail.
    pub fn open_read_only(&self) -> Result<Connection> {
        if !self.exists() {
            return Err(StoreError::Missing {
                path: self.path.clone(),
            });
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(&self.path, flags).map_err(|source| {
            StoreError::Open {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), "opened store read-only");
        Ok(connection)
    }

    /// Deletes the store file (and a leftover rollback journal) if present.
    pub fn remove(&self) -> Result<()> {
        let journal = PathBuf::from(format!("{}-journal", self.path.display()));
        for path in [&self.path, &journal] {
            match std::fs::remove_file(path) {
                Ok(()) => debug!(path = %path.display(), "removed store file"),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(StoreError::Remove {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_file_with_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("normalized.db"));
        assert!(!store.exists());

        let conn = store.open().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
        drop(conn);
        assert!(store.exists());
    }

    #[test]
    fn test_read_only_requires_existing_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("missing.db"));

        assert!(matches!(
            store.open_read_only(),
            Err(StoreError::Missing { .. })
        ));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("normalized.db"));
        store
            .open()
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER);")
            .unwrap();

        let conn = store.open_read_only().unwrap();
        assert!(conn.execute("INSERT INTO t (x) VALUES (1)", []).is_err());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("normalized.db"));
        drop(store.open().unwrap());

        store.remove().unwrap();
        assert!(!store.exists());
        store.remove().unwrap();
    }
}
