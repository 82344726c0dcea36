//! SQLite-backed [`KvStore`]
//!
//! One connection behind a mutex; every trait call holds the lock for its
//! whole duration and multi-statement calls run in a transaction, so each
//! call is atomic with respect to other threads in the process. Separate
//! processes are serialised by SQLite itself.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use dynprompt_core::errors::PromptError;
use dynprompt_core::store::KvStore;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

fn sql_limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl SqliteStore {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened sqlite store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| PromptError::storage(op, "sqlite connection lock poisoned"))
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock("kv_get")?;
        conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock("kv_set")?;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().timestamp()],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    fn delete(&self, keys: &[&str]) -> Result<usize> {
        let mut conn = self.lock("kv_delete")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        let mut removed = 0;
        for key in keys {
            removed += tx
                .execute("DELETE FROM kv_entries WHERE key = ?1", [*key])
                .map_err(from_rusqlite)?;
            if tx
                .execute("DELETE FROM kv_lists WHERE key = ?1", [*key])
                .map_err(from_rusqlite)?
                > 0
            {
                removed += 1;
            }
        }
        tx.commit().map_err(from_rusqlite)?;
        Ok(removed)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        let conn = self.lock("kv_exists")?;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM kv_entries WHERE key = ?1)",
            [key],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }

    fn list_push_front(&self, key: &str, value: &str, cap: usize) -> Result<()> {
        let mut conn = self.lock("kv_list_push")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        tx.execute(
            "INSERT INTO kv_lists (key, value, created_at) VALUES (?1, ?2, ?3)",
            params![key, value, chrono::Utc::now().timestamp()],
        )
        .map_err(from_rusqlite)?;
        tx.execute(
            "DELETE FROM kv_lists WHERE key = ?1 AND id NOT IN (
                SELECT id FROM kv_lists WHERE key = ?1 ORDER BY id DESC LIMIT ?2
            )",
            params![key, sql_limit(cap)],
        )
        .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)
    }

    fn list_range(&self, key: &str, limit: usize) -> Result<Vec<String>> {
        let conn = self.lock("kv_list_range")?;
        let mut stmt = conn
            .prepare("SELECT value FROM kv_lists WHERE key = ?1 ORDER BY id DESC LIMIT ?2")
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params![key, sql_limit(limit)], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_roundtrip_and_overwrite() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("p:active").unwrap(), None);
        store.set("p:active", "one").unwrap();
        store.set("p:active", "two").unwrap();
        assert_eq!(store.get("p:active").unwrap().as_deref(), Some("two"));
        assert!(store.exists("p:active").unwrap());
    }

    #[test]
    fn test_list_trims_oldest() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..5 {
            store.list_push_front("p:changelog", &i.to_string(), 3).unwrap();
        }
        assert_eq!(store.list_range("p:changelog", 10).unwrap(), vec!["4", "3", "2"]);
        assert_eq!(store.list_range("p:changelog", 1).unwrap(), vec!["4"]);
    }

    #[test]
    fn test_delete_counts_keys() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.list_push_front("l", "x", 10).unwrap();
        store.list_push_front("l", "y", 10).unwrap();
        assert_eq!(store.delete(&["a", "l", "missing"]).unwrap(), 2);
        assert!(store.list_range("l", 10).unwrap().is_empty());
    }
}
