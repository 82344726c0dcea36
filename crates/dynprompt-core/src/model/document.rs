use serde::{Deserialize, Serialize};

use dynprompt_core_types::schema::{KEY_ACTIVE, KEY_BACKUP};

/// The two document slots kept per prompt identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Current, mutable document
    Active,
    /// Baseline captured at load time
    Backup,
}

impl Slot {
    /// Key suffix under the prompt namespace
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Slot::Active => KEY_ACTIVE,
            Slot::Backup => KEY_BACKUP,
        }
    }
}

/// Existence and size (in characters) of both slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub active_exists: bool,
    pub active_size: usize,
    pub backup_exists: bool,
    pub backup_size: usize,
}
