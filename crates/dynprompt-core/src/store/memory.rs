use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use super::KvStore;
use crate::errors::{PromptError, Result};

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, String>,
    lists: HashMap<String, VecDeque<String>>,
}

/// In-process [`KvStore`] backed by hash maps
///
/// A single mutex guards both maps, so every call is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| PromptError::storage(op, "memory store lock poisoned"))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock("kv_get")?.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock("kv_set")?
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, keys: &[&str]) -> Result<usize> {
        let mut inner = self.lock("kv_delete")?;
        let mut removed = 0;
        for key in keys {
            if inner.values.remove(*key).is_some() {
                removed += 1;
            }
            if inner.lists.remove(*key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.lock("kv_exists")?.values.contains_key(key))
    }

    fn list_push_front(&self, key: &str, value: &str, cap: usize) -> Result<()> {
        let mut inner = self.lock("kv_list_push")?;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        list.truncate(cap);
        Ok(())
    }

    fn list_range(&self, key: &str, limit: usize) -> Result<Vec<String>> {
        let inner = self.lock("kv_list_range")?;
        Ok(inner
            .lists
            .get(key)
            .map(|list| list.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
