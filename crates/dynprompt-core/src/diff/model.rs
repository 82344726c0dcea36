//! Diff output types.

use serde::{Deserialize, Serialize};

/// Tag attached to each reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMarker {
    /// Present in active beyond the end of backup (`+`)
    Added,
    /// Same index in both, different content (`~`)
    Changed,
    /// Present in backup beyond the end of active (`-`)
    Removed,
}

impl DiffMarker {
    pub fn symbol(&self) -> char {
        match self {
            DiffMarker::Added => '+',
            DiffMarker::Changed => '~',
            DiffMarker::Removed => '-',
        }
    }
}

/// One reported line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub marker: DiffMarker,
    /// Zero-based line index in the document the content came from
    pub index: usize,
    /// Line content with surrounding whitespace trimmed
    pub content: String,
}

/// Result of comparing backup against active
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "lines", rename_all = "snake_case")]
pub enum DiffReport {
    /// Nothing is loaded
    NoActiveDocument,
    /// Active is byte-identical to backup
    Unmodified,
    /// Tagged lines: additions and changes in active order, then removals
    Changes(Vec<DiffLine>),
}

impl DiffReport {
    /// True only when at least one line is reported
    pub fn has_changes(&self) -> bool {
        matches!(self, DiffReport::Changes(lines) if !lines.is_empty())
    }

    pub fn lines(&self) -> &[DiffLine] {
        match self {
            DiffReport::Changes(lines) => lines,
            _ => &[],
        }
    }
}
