//! Error helpers for dynprompt-store
//!
//! Everything surfaces as `PromptError::Storage` so callers of `KvStore`
//! see one error shape regardless of backend.

use dynprompt_core::errors::PromptError;

pub use dynprompt_core::errors::Result;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> PromptError {
    PromptError::storage(
        "migration",
        format!("Migration {} failed: {}", migration_id, reason),
    )
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> PromptError {
    PromptError::storage(
        "migration_checksum",
        format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    )
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> PromptError {
    PromptError::storage("sqlite", err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> PromptError {
    PromptError::storage(operation, err.to_string())
}
