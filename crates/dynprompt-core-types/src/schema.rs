//! Canonical schema constants for structured logging and storage keys
//!
//! These constants keep log event names and key layouts consistent across
//! crates.

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Storage key suffixes, joined to a namespace with ':'
pub const KEY_ACTIVE: &str = "active";
pub const KEY_BACKUP: &str = "backup";
pub const KEY_CHANGELOG: &str = "changelog";

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "prompt";

/// Build a namespaced storage key, e.g. `prompt:active`
pub fn namespaced_key(namespace: &str, suffix: &str) -> String {
    format!("{}:{}", namespace, suffix)
}
