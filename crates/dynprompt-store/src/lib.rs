//! DynPrompt Store - SQLite persistence and runtime configuration
//!
//! Provides:
//! - `SqliteStore`, a `KvStore` backed by a single SQLite file
//! - Embedded, checksummed schema migrations
//! - `Settings` loaded from defaults, `dynprompt.toml` and `DYNPROMPT_*` env vars

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod sqlite;

// Re-export key types
pub use config::Settings;
pub use sqlite::SqliteStore;
