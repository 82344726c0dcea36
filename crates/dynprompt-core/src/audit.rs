//! Bounded, newest-first audit trail
//!
//! Entries live as JSON strings in one list under `{namespace}:changelog`.
//! Appends insert at the head and trim to [`MAX_HISTORY`], so the oldest
//! entry is evicted first and reads come back newest-first.

use serde_json::{Map, Value};

use dynprompt_core_types::schema::{namespaced_key, KEY_CHANGELOG};

use crate::errors::Result;
use crate::model::{AuditAction, AuditEntry};
use crate::store::KvStore;

/// Maximum number of retained entries
pub const MAX_HISTORY: usize = 100;

/// Default number of entries returned by history queries
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

pub const EMPTY_HISTORY_MESSAGE: &str = "No history";

#[derive(Debug, Clone)]
pub struct AuditLog<S> {
    kv: S,
    key: String,
}

impl<S: KvStore> AuditLog<S> {
    pub fn new(kv: S, namespace: &str) -> Self {
        Self {
            kv,
            key: namespaced_key(namespace, KEY_CHANGELOG),
        }
    }

    /// Append an already-built entry
    pub fn append(&self, entry: &AuditEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        self.kv.list_push_front(&self.key, &json, MAX_HISTORY)
    }

    /// Record a general action (load, revert, ...)
    pub fn log_action(
        &self,
        action: impl Into<AuditAction>,
        metadata: Option<Map<String, Value>>,
    ) -> Result<()> {
        self.append(&AuditEntry::action(action, metadata))
    }

    /// Record a modification by `user_id`
    pub fn log_modification(&self, user_id: &str, instruction: &str) -> Result<()> {
        self.append(&AuditEntry::modification(user_id, instruction))
    }

    /// Up to `limit` entries, newest first, never more than [`MAX_HISTORY`]
    ///
    /// Entries that no longer decode are skipped with a warning.
    pub fn history(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        let limit = limit.min(MAX_HISTORY);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let raw = self.kv.list_range(&self.key, limit)?;
        Ok(raw
            .iter()
            .filter_map(|json| match serde_json::from_str::<AuditEntry>(json) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "skipping undecodable audit entry");
                    None
                }
            })
            .collect())
    }

    /// Drop every entry
    pub fn clear(&self) -> Result<()> {
        self.kv.delete(&[self.key.as_str()])?;
        Ok(())
    }

    /// Human-readable history, one line per entry
    pub fn format_history(&self, limit: usize) -> Result<String> {
        let entries = self.history(limit)?;
        if entries.is_empty() {
            return Ok(EMPTY_HISTORY_MESSAGE.to_string());
        }
        Ok(entries
            .iter()
            .map(AuditEntry::format_line)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn log() -> AuditLog<MemoryStore> {
        AuditLog::new(MemoryStore::new(), "prompt")
    }

    #[test]
    fn test_history_newest_first() {
        let log = log();
        log.log_modification("u1", "first").unwrap();
        log.log_modification("u1", "second").unwrap();
        let history = log.history(10).unwrap();
        assert_eq!(history[0].instruction.as_deref(), Some("second"));
        assert_eq!(history[1].instruction.as_deref(), Some("first"));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = log();
        for i in 0..(MAX_HISTORY + 5) {
            log.log_modification("u", &format!("edit {}", i)).unwrap();
        }
        let history = log.history(usize::MAX).unwrap();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(
            history[0].instruction.as_deref(),
            Some(format!("edit {}", MAX_HISTORY + 4).as_str())
        );
        assert_eq!(history[MAX_HISTORY - 1].instruction.as_deref(), Some("edit 5"));
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let log = log();
        log.log_action(AuditAction::Revert, None).unwrap();
        assert!(log.history(0).unwrap().is_empty());
    }

    #[test]
    fn test_undecodable_entries_are_skipped() {
        let kv = MemoryStore::new();
        kv.list_push_front("prompt:changelog", "not json", MAX_HISTORY)
            .unwrap();
        let log = AuditLog::new(kv, "prompt");
        log.log_action("load", None).unwrap();
        let history = log.history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, AuditAction::Load);
    }

    #[test]
    fn test_format_empty_and_clear() {
        let log = log();
        assert_eq!(log.format_history(10).unwrap(), EMPTY_HISTORY_MESSAGE);
        log.log_action(AuditAction::Revert, None).unwrap();
        assert!(log.format_history(10).unwrap().contains("REVERT"));
        log.clear().unwrap();
        assert_eq!(log.format_history(10).unwrap(), EMPTY_HISTORY_MESSAGE);
    }
}
