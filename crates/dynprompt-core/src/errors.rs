use thiserror::Error;

/// Result type alias using PromptError
pub type Result<T> = std::result::Result<T, PromptError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code that transports hand back to callers.
/// `NoActiveDocument` classifies the "nothing loaded" outcome for transports;
/// the manager itself never returns it as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Request shape
    InvalidInput,
    UnknownMethod,

    // Document lifecycle outcomes
    NoActiveDocument,

    // Acquisition
    SourceUnavailable,

    // Integration
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownMethod => "ERR_UNKNOWN_METHOD",
            ExErrorKind::NoActiveDocument => "ERR_NO_ACTIVE_DOCUMENT",
            ExErrorKind::SourceUnavailable => "ERR_SOURCE_UNAVAILABLE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the context needed to report the failure
/// over a transport: the operation, the key involved (a storage key or a
/// request parameter) and a message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for dynprompt operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptError {
    /// The document could not be fetched from its source
    #[error("Source unavailable: {source_ref}: {reason}")]
    SourceUnavailable { source_ref: String, reason: String },

    /// The backing key-value store failed
    #[error("Storage error during {op}: {message}")]
    Storage { op: String, message: String },

    /// A stored record could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Caller supplied an unusable argument
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl PromptError {
    /// Shorthand for a storage failure
    pub fn storage(op: impl Into<String>, message: impl Into<String>) -> Self {
        PromptError::Storage {
            op: op.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        PromptError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from PromptError to the canonical ExError
impl From<PromptError> for ExError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::SourceUnavailable { source_ref, reason } => {
                ExError::new(ExErrorKind::SourceUnavailable)
                    .with_op("load")
                    .with_message(format!("{}: {}", source_ref, reason))
            }
            PromptError::Storage { op, message } => ExError::new(ExErrorKind::Persistence)
                .with_op(op)
                .with_message(message),
            PromptError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            PromptError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::UnknownMethod,
            ExErrorKind::NoActiveDocument,
            ExErrorKind::SourceUnavailable,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_source_unavailable_maps_to_kind() {
        let err = PromptError::SourceUnavailable {
            source_ref: "https://example.invalid/p.md".to_string(),
            reason: "404 Not Found".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::SourceUnavailable);
        assert_eq!(ex.code(), "ERR_SOURCE_UNAVAILABLE");
        assert!(ex.message().contains("404"));
    }

    #[test]
    fn test_storage_maps_to_persistence() {
        let ex: ExError = PromptError::storage("kv_set", "disk full").into();
        assert_eq!(ex.kind(), ExErrorKind::Persistence);
        assert_eq!(ex.op(), Some("kv_set"));
    }

    #[test]
    fn test_display_includes_context() {
        let ex = ExError::new(ExErrorKind::Persistence)
            .with_op("kv_get")
            .with_key("prompt:active")
            .with_message("locked");
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_PERSISTENCE]"));
        assert!(rendered.contains("kv_get"));
        assert!(rendered.contains("prompt:active"));
    }
}
