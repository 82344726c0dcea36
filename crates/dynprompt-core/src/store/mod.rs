//! Storage abstraction
//!
//! Everything the manager persists goes through [`KvStore`], a small
//! string-keyed interface with scalar values and bounded lists. The engine
//! adds no locking of its own; implementations are expected to make each
//! call atomic per key.

pub mod documents;
pub mod memory;

pub use documents::DocumentStore;
pub use memory::MemoryStore;

use crate::errors::Result;

/// Minimal key-value interface with head-insert lists
pub trait KvStore: Send + Sync {
    /// Read a scalar value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a scalar value, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove scalars and lists under the given keys; returns how many existed
    fn delete(&self, keys: &[&str]) -> Result<usize>;

    /// Whether a scalar value exists under the key
    fn exists(&self, key: &str) -> Result<bool>;

    /// Insert at the head of a list, then trim it to `cap` elements
    fn list_push_front(&self, key: &str, value: &str, cap: usize) -> Result<()>;

    /// Up to `limit` elements from the head of a list
    fn list_range(&self, key: &str, limit: usize) -> Result<Vec<String>>;
}

impl<T: KvStore + ?Sized> KvStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, keys: &[&str]) -> Result<usize> {
        (**self).delete(keys)
    }

    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }

    fn list_push_front(&self, key: &str, value: &str, cap: usize) -> Result<()> {
        (**self).list_push_front(key, value, cap)
    }

    fn list_range(&self, key: &str, limit: usize) -> Result<Vec<String>> {
        (**self).list_range(key, limit)
    }
}
