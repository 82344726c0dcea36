//! Domain records persisted through the key-value store

pub mod audit;
pub mod document;

pub use audit::{AuditAction, AuditEntry};
pub use document::{Slot, StoreMetadata};
