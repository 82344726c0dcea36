//! DynPrompt Core - prompt document management kernel
//!
//! This crate provides:
//! - Instruction-driven modification of a prompt document (ordered rule set)
//! - Active/backup document slots over a pluggable key-value store
//! - A bounded, newest-first audit log
//! - Positional line diff between backup and active documents
//! - Structured operation logging

pub mod audit;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod manager;
pub mod model;
pub mod modifier;
pub mod source;
pub mod store;

pub use dynprompt_core_types as core_types;

// Re-export commonly used types
pub use audit::{AuditLog, DEFAULT_HISTORY_LIMIT, MAX_HISTORY};
pub use diff::{compute_diff, render_diff, DiffLine, DiffMarker, DiffReport};
pub use errors::{ExError, ExErrorKind, PromptError, Result};
pub use manager::{LoadOutcome, Modification, PromptManager, DEFAULT_ACTOR};
pub use model::{AuditAction, AuditEntry, Slot, StoreMetadata};
pub use modifier::{apply, Edit};
pub use source::{DocumentSource, FetchedDocument, LiteralSource};
pub use store::{DocumentStore, KvStore, MemoryStore};
