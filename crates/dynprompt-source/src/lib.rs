//! DynPrompt Source - reads prompt documents from files and URLs
//!
//! A source string is classified once: `http://`/`https://` prefixes are
//! fetched, paths to existing files are read, and anything else is taken
//! as the document text itself.

use std::path::Path;
use std::time::Duration;

use dynprompt_core::errors::{PromptError, Result};
use dynprompt_core::source::{DocumentSource, FetchedDocument, INLINE_LABEL};

/// How a source string will be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Local,
    Literal,
}

impl SourceKind {
    pub fn classify(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            SourceKind::Remote
        } else if Path::new(source).is_file() {
            SourceKind::Local
        } else {
            SourceKind::Literal
        }
    }
}

fn unavailable(source: &str, reason: impl Into<String>) -> PromptError {
    PromptError::SourceUnavailable {
        source_ref: source.to_string(),
        reason: reason.into(),
    }
}

/// [`DocumentSource`] for URLs, files and literal text
#[derive(Debug, Clone)]
pub struct SourceLoader {
    timeout: Duration,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl SourceLoader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn fetch_remote(&self, url: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| unavailable(url, e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .map_err(|e| unavailable(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(url, format!("HTTP {}", status)));
        }

        response.text().map_err(|e| unavailable(url, e.to_string()))
    }

    fn read_local(&self, path: &str) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| unavailable(path, e.to_string()))
    }
}

impl DocumentSource for SourceLoader {
    fn fetch(&self, source: &str) -> Result<FetchedDocument> {
        let kind = SourceKind::classify(source);
        tracing::debug!(kind = ?kind, "resolving document source");

        let (content, label) = match kind {
            SourceKind::Remote => (self.fetch_remote(source)?, source.to_string()),
            SourceKind::Local => (self.read_local(source)?, source.to_string()),
            SourceKind::Literal => (source.to_string(), INLINE_LABEL.to_string()),
        };
        Ok(FetchedDocument { content, label })
    }
}
