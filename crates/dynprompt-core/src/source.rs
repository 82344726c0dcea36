//! Document acquisition seam
//!
//! The manager never reads files or talks to the network itself; it asks a
//! [`DocumentSource`] for the text behind a source string. The
//! `dynprompt-source` crate provides the file/HTTP implementation.

use crate::errors::Result;

/// Text returned by a source, with the label recorded in the audit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub content: String,
    pub label: String,
}

/// Label recorded for documents supplied as literal text
pub const INLINE_LABEL: &str = "inline";

/// Resolves a source string to document text
pub trait DocumentSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `PromptError::SourceUnavailable` when the source cannot be read.
    fn fetch(&self, source: &str) -> Result<FetchedDocument>;
}

/// Treats every source string as the document itself
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralSource;

impl DocumentSource for LiteralSource {
    fn fetch(&self, source: &str) -> Result<FetchedDocument> {
        Ok(FetchedDocument {
            content: source.to_string(),
            label: INLINE_LABEL.to_string(),
        })
    }
}
