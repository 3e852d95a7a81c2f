//! Content fingerprint of the store.
//!
//! The digest covers row values only, in table order then surrogate key
//! order, so two rebuilds from the same extract produce the same digest
//! regardless of SQLite page layout.

use rusqlite::Connection;
use rusqlite::types::ValueRef;
use sha2::{Digest, Sha256};

use sales_model::Table;

use crate::error::Result;

/// Hex-encoded SHA-256 over every row of the six tables.
pub fn store_digest(connection: &Connection) -> Result<String> {
    let mut hasher = Sha256::new();
    for table in Table::PIPELINE_ORDER {
        hasher.update(table.name().as_bytes());
        hasher.update([0u8]);
        let sql = format!(
            "SELECT * FROM {} ORDER BY {}",
            table.name(),
            table.id_column()
        );
        let mut statement = connection.prepare(&sql)?;
        let width = statement.column_count();
        let mut rows = statement.query([])?;
        while let Some(row) = rows.next()? {
            for index in 0..width {
                hash_value(&mut hasher, row.get_ref(index)?);
            }
            hasher.update([0xffu8]);
        }
    }
    let digest: [u8; 32] = hasher.finalize().into();
    Ok(hex::encode(digest))
}

fn hash_value(hasher: &mut Sha256, value: ValueRef<'_>) {
    match value {
        ValueRef::Null => hasher.update([0u8]),
        ValueRef::Integer(v) => {
            hasher.update([1u8]);
            hasher.update(v.to_le_bytes());
        }
        ValueRef::Real(v) => {
            hasher.update([2u8]);
            hasher.update(v.to_bits().to_le_bytes());
        }
        ValueRef::Text(bytes) => {
            hasher.update([3u8]);
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        ValueRef::Blob(bytes) => {
            hasher.update([4u8]);
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recreate_table;

    fn empty_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        for table in Table::PIPELINE_ORDER {
            recreate_table(&conn, table).unwrap();
        }
        conn
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = empty_store();
        let b = empty_store();
        assert_eq!(store_digest(&a).unwrap(), store_digest(&b).unwrap());

        a.execute("INSERT INTO Region (Region) VALUES ('Europe')", [])
            .unwrap();
        assert_ne!(store_digest(&a).unwrap(), store_digest(&b).unwrap());

        b.execute("INSERT INTO Region (Region) VALUES ('Europe')", [])
            .unwrap();
        assert_eq!(store_digest(&a).unwrap(), store_digest(&b).unwrap());
        assert_eq!(store_digest(&a).unwrap().len(), 64);
    }
}
