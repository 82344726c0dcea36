//! Audit trail records
//!
//! Entries are serialized to JSON, one per list element, so the shape below
//! is also the storage format:
//!
//! ```json
//! {"timestamp":1718000000,"action":"modify","user_id":"u1","instruction":"add rule: x"}
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of event recorded in the audit log
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    Load,
    Modify,
    Revert,
    Clear,
    /// Any other caller-supplied action name
    Other(String),
}

impl AuditAction {
    pub fn as_str(&self) -> &str {
        match self {
            AuditAction::Load => "load",
            AuditAction::Modify => "modify",
            AuditAction::Revert => "revert",
            AuditAction::Clear => "clear",
            AuditAction::Other(name) => name,
        }
    }
}

impl From<String> for AuditAction {
    fn from(name: String) -> Self {
        match name.as_str() {
            "load" => AuditAction::Load,
            "modify" => AuditAction::Modify,
            "revert" => AuditAction::Revert,
            "clear" => AuditAction::Clear,
            _ => AuditAction::Other(name),
        }
    }
}

impl From<&str> for AuditAction {
    fn from(name: &str) -> Self {
        AuditAction::from(name.to_string())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        action.as_str().to_string()
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unix seconds
    pub timestamp: i64,
    pub action: AuditAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl AuditEntry {
    /// Entry for a general action, stamped now
    pub fn action(action: impl Into<AuditAction>, metadata: Option<Map<String, Value>>) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            action: action.into(),
            user_id: None,
            instruction: None,
            metadata,
        }
    }

    /// Entry for a modification, stamped now
    pub fn modification(user_id: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            action: AuditAction::Modify,
            user_id: Some(user_id.into()),
            instruction: Some(instruction.into()),
            metadata: None,
        }
    }

    /// A string-valued metadata field, if present
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }

    /// Timestamp in the local time zone
    pub fn local_time(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.timestamp, 0).single()
    }

    /// One display line, e.g. `2024-06-10 09:12:44 | MODIFY | u1 | add rule: x`
    pub fn format_line(&self) -> String {
        let time = self
            .local_time()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.to_string());

        match &self.action {
            AuditAction::Modify => format!(
                "{} | MODIFY | {} | {}",
                time,
                self.user_id.as_deref().unwrap_or(""),
                self.instruction.as_deref().unwrap_or("")
            ),
            AuditAction::Load => format!(
                "{} | LOAD | Source: {}",
                time,
                self.metadata_str("source").unwrap_or("unknown")
            ),
            AuditAction::Revert => format!("{} | REVERT | Restored to original", time),
            other => format!("{} | {}", time, other.as_str().to_uppercase()),
        }
    }
}
