use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::Result;

/// Single-file key→value store backing the wishlist blob and runtime
/// settings. One `state` table, one row per key.
#[derive(Debug)]
pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    /// Open or create the store at the given path with WAL mode.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing and for degraded operation
    /// when the on-disk database cannot be opened).
    pub fn open_in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .ok();
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let store = StateStore::open_in_memory().unwrap();
        assert_eq!(store.get("wishlist").unwrap(), None);
        store.set("wishlist", "[\"Truthear Gate\"]").unwrap();
        assert_eq!(
            store.get("wishlist").unwrap().as_deref(),
            Some("[\"Truthear Gate\"]")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let store = StateStore::open_in_memory().unwrap();
        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_open_creates_parent_dirs_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("sub/dir/state.db");
        {
            let store = StateStore::open(&db_path).unwrap();
            store.set("k", "v").unwrap();
        }
        assert!(db_path.exists());
        let store = StateStore::open(&db_path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
