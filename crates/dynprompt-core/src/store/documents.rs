use dynprompt_core_types::schema::namespaced_key;

use super::KvStore;
use crate::errors::Result;
use crate::model::{Slot, StoreMetadata};

/// The `active` and `backup` slots for one prompt identity
///
/// Every write is a full overwrite; there is no history beyond the two slots.
#[derive(Debug, Clone)]
pub struct DocumentStore<S> {
    kv: S,
    active_key: String,
    backup_key: String,
}

impl<S: KvStore> DocumentStore<S> {
    pub fn new(kv: S, namespace: &str) -> Self {
        Self {
            kv,
            active_key: namespaced_key(namespace, Slot::Active.key_suffix()),
            backup_key: namespaced_key(namespace, Slot::Backup.key_suffix()),
        }
    }

    fn key(&self, slot: Slot) -> &str {
        match slot {
            Slot::Active => &self.active_key,
            Slot::Backup => &self.backup_key,
        }
    }

    pub fn get(&self, slot: Slot) -> Result<Option<String>> {
        self.kv.get(self.key(slot))
    }

    pub fn set(&self, slot: Slot, content: &str) -> Result<()> {
        self.kv.set(self.key(slot), content)
    }

    /// Whether an active document exists
    pub fn exists(&self) -> Result<bool> {
        self.kv.exists(&self.active_key)
    }

    pub fn get_active(&self) -> Result<Option<String>> {
        self.get(Slot::Active)
    }

    pub fn set_active(&self, content: &str) -> Result<()> {
        self.set(Slot::Active, content)
    }

    pub fn get_backup(&self) -> Result<Option<String>> {
        self.get(Slot::Backup)
    }

    pub fn set_backup(&self, content: &str) -> Result<()> {
        self.set(Slot::Backup, content)
    }

    /// Remove both slots
    pub fn clear(&self) -> Result<()> {
        self.kv
            .delete(&[self.active_key.as_str(), self.backup_key.as_str()])?;
        Ok(())
    }

    pub fn metadata(&self) -> Result<StoreMetadata> {
        let active = self.get_active()?;
        let backup = self.get_backup()?;
        Ok(StoreMetadata {
            active_exists: active.is_some(),
            active_size: active.as_deref().map_or(0, |s| s.chars().count()),
            backup_exists: backup.is_some(),
            backup_size: backup.as_deref().map_or(0, |s| s.chars().count()),
        })
    }
}
