//! Database connection management

use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path, creating parent directories
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
    }
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection for concurrent CLI and server access
pub fn configure(conn: &Connection) -> Result<()> {
    // journal_mode returns a row, so it cannot go through execute()
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(from_rusqlite)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(from_rusqlite)?;
    Ok(())
}
