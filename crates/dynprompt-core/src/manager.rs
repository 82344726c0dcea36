//! Prompt manager: the operations exposed to transports
//!
//! Owns the document slots and the audit log for one prompt identity and
//! runs instructions through the modifier. Non-failure outcomes (nothing
//! loaded, already loaded, unrecognised instruction) come back as values;
//! only storage and acquisition faults are `Err`.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};

use crate::audit::AuditLog;
use crate::diff::{compute_diff, render_diff, DiffReport};
use crate::errors::Result;
use crate::model::{AuditAction, AuditEntry, StoreMetadata};
use crate::modifier::{self, Edit};
use crate::source::{DocumentSource, LiteralSource};
use crate::store::{DocumentStore, KvStore, MemoryStore};
use crate::{log_op_end, log_op_error, log_op_start};

/// Actor recorded when a caller does not name one
pub const DEFAULT_ACTOR: &str = "system";

/// Result of a load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was fetched and written to both slots
    Loaded(String),
    /// An active document already existed and `force` was not set
    AlreadyLoaded(String),
}

impl LoadOutcome {
    pub fn content(&self) -> &str {
        match self {
            LoadOutcome::Loaded(c) | LoadOutcome::AlreadyLoaded(c) => c,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            LoadOutcome::Loaded(c) | LoadOutcome::AlreadyLoaded(c) => c,
        }
    }

    pub fn is_already_loaded(&self) -> bool {
        matches!(self, LoadOutcome::AlreadyLoaded(_))
    }
}

/// Result of a successful modification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    /// New active document
    pub content: String,
    /// Edits recognised in the instruction, in the order applied
    pub edits: Vec<Edit>,
}

impl Modification {
    /// True when no rule matched and the document is unchanged
    pub fn is_unrecognized(&self) -> bool {
        self.edits.is_empty()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Document manager for a single prompt identity
pub struct PromptManager<S> {
    namespace: String,
    documents: DocumentStore<S>,
    audit: AuditLog<S>,
    source: Box<dyn DocumentSource>,
}

impl PromptManager<Arc<MemoryStore>> {
    /// Manager over a fresh in-memory store with literal sources
    pub fn in_memory(namespace: &str) -> Self {
        Self::new(Arc::new(MemoryStore::new()), namespace)
    }
}

impl<S: KvStore + Clone> PromptManager<S> {
    /// Build a manager whose slots and log share `kv`
    pub fn new(kv: S, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            documents: DocumentStore::new(kv.clone(), namespace),
            audit: AuditLog::new(kv, namespace),
            source: Box::new(LiteralSource),
        }
    }
}

impl<S: KvStore> PromptManager<S> {
    /// Replace the document source used by [`PromptManager::load`]
    pub fn with_source(mut self, source: Box<dyn DocumentSource>) -> Self {
        self.source = source;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn documents(&self) -> &DocumentStore<S> {
        &self.documents
    }

    pub fn audit(&self) -> &AuditLog<S> {
        &self.audit
    }

    /// Load a document into both slots
    ///
    /// With an active document present and `force == false` nothing is
    /// fetched and the existing content is returned.
    ///
    /// # Errors
    ///
    /// `SourceUnavailable` from the source, or a storage error.
    pub fn load(&self, source: &str, force: bool) -> Result<LoadOutcome> {
        let start = Instant::now();
        log_op_start!("load", namespace = %self.namespace, force = force);

        let result = self.load_inner(source, force);
        match &result {
            Ok(outcome) => log_op_end!(
                "load",
                duration_ms = elapsed_ms(start),
                already_loaded = outcome.is_already_loaded(),
                doc_chars = outcome.content().chars().count()
            ),
            Err(err) => log_op_error!("load", err.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    fn load_inner(&self, source: &str, force: bool) -> Result<LoadOutcome> {
        if !force {
            if let Some(existing) = self.documents.get_active()? {
                tracing::warn!(
                    namespace = %self.namespace,
                    "active prompt already exists; pass force to overwrite"
                );
                return Ok(LoadOutcome::AlreadyLoaded(existing));
            }
        }

        let fetched = self.source.fetch(source)?;
        self.documents.set_active(&fetched.content)?;
        self.documents.set_backup(&fetched.content)?;

        let mut metadata = Map::new();
        metadata.insert("source".to_string(), Value::String(fetched.label));
        self.audit.log_action(AuditAction::Load, Some(metadata))?;

        Ok(LoadOutcome::Loaded(fetched.content))
    }

    /// Current active document
    pub fn active(&self) -> Result<Option<String>> {
        self.documents.get_active()
    }

    /// Apply an instruction to the active document
    ///
    /// Returns `None` when nothing is loaded. An instruction no rule
    /// recognises still counts as a modification: the unchanged document is
    /// written back and the attempt is logged.
    ///
    /// # Errors
    ///
    /// Storage errors only.
    pub fn modify(&self, instruction: &str, actor: &str) -> Result<Option<Modification>> {
        let start = Instant::now();
        log_op_start!("modify", namespace = %self.namespace, actor = actor);

        let result = self.modify_inner(instruction, actor);
        match &result {
            Ok(Some(m)) => log_op_end!(
                "modify",
                duration_ms = elapsed_ms(start),
                edit_count = m.edits.len(),
                doc_chars = m.content.chars().count()
            ),
            Ok(None) => log_op_end!(
                "modify",
                duration_ms = elapsed_ms(start),
                no_active_document = true
            ),
            Err(err) => log_op_error!("modify", err.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    fn modify_inner(&self, instruction: &str, actor: &str) -> Result<Option<Modification>> {
        let Some(current) = self.documents.get_active()? else {
            tracing::warn!(namespace = %self.namespace, "no active prompt; load one first");
            return Ok(None);
        };

        let edits = modifier::parse(instruction);
        let content = modifier::apply_edits(&current, &edits);

        self.documents.set_active(&content)?;
        self.audit.log_modification(actor, instruction)?;

        Ok(Some(Modification { content, edits }))
    }

    /// Restore the active document from the backup
    ///
    /// Returns `None` when no backup exists.
    pub fn revert(&self) -> Result<Option<String>> {
        let start = Instant::now();
        log_op_start!("revert", namespace = %self.namespace);

        let result = self.revert_inner();
        match &result {
            Ok(restored) => log_op_end!(
                "revert",
                duration_ms = elapsed_ms(start),
                restored = restored.is_some()
            ),
            Err(err) => log_op_error!("revert", err.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    fn revert_inner(&self) -> Result<Option<String>> {
        let Some(backup) = self.documents.get_backup()? else {
            tracing::warn!(namespace = %self.namespace, "no backup found");
            return Ok(None);
        };
        self.documents.set_active(&backup)?;
        self.audit.log_action(AuditAction::Revert, None)?;
        Ok(Some(backup))
    }

    /// Positional diff of backup against active
    pub fn diff(&self) -> Result<DiffReport> {
        let backup = self.documents.get_backup()?;
        let active = self.documents.get_active()?;
        Ok(compute_diff(backup.as_deref(), active.as_deref()))
    }

    /// [`PromptManager::diff`] rendered as text
    pub fn diff_text(&self) -> Result<String> {
        Ok(render_diff(&self.diff()?))
    }

    /// Up to `limit` audit entries, newest first
    pub fn history(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        self.audit.history(limit)
    }

    pub fn format_history(&self, limit: usize) -> Result<String> {
        self.audit.format_history(limit)
    }

    /// Remove both slots and the audit log
    pub fn clear(&self) -> Result<()> {
        let start = Instant::now();
        log_op_start!("clear", namespace = %self.namespace);

        let result = self
            .documents
            .clear()
            .and_then(|()| self.audit.clear());
        match &result {
            Ok(()) => log_op_end!("clear", duration_ms = elapsed_ms(start)),
            Err(err) => log_op_error!("clear", err.clone(), duration_ms = elapsed_ms(start)),
        }
        result
    }

    pub fn metadata(&self) -> Result<StoreMetadata> {
        self.documents.metadata()
    }
}
