//! The ordered rule set
//!
//! A rule pairs an instruction pattern with a builder that turns the captured
//! groups into an [`Edit`]. Patterns run against the normalized (lower-case,
//! trimmed) instruction and are unanchored, so one instruction can satisfy
//! several rules.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::edit::{Direction, Edit};

/// A (pattern, edit builder) pair recognising one instruction shape
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> Option<Edit>,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, build: fn(&Captures<'_>) -> Option<Edit>) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("rule patterns are valid"),
            build,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The edit this rule requests for a normalized instruction, if it matches
    pub fn matches(&self, normalized: &str) -> Option<Edit> {
        self.pattern
            .captures(normalized)
            .and_then(|caps| (self.build)(&caps))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

fn group(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// All rules, in application order
pub fn rule_set() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new(
                "tone",
                r"(?:change|set|make)\s+tone\s+(?:to\s+)?(.+)",
                |caps| group(caps, 1).map(Edit::SetTone),
            ),
            Rule::new("add_rule", r"add\s+rule:?\s*(.+)", |caps| {
                group(caps, 1).map(Edit::AddRule)
            }),
            Rule::new(
                "remove_rule",
                r"remove\s+rule\s+(?:about\s+)?(.+)",
                |caps| group(caps, 1).map(Edit::RemoveRule),
            ),
            Rule::new("sentence_default", r"default\s+(\d+)\s+sentence", |caps| {
                caps.get(1)
                    .and_then(|m| m.as_str().parse().ok())
                    .map(Edit::SetSentenceDefault)
            }),
            Rule::new("verbosity", r"make\s+(more|less)\s+verbose", |caps| {
                caps.get(1)
                    .and_then(|m| Direction::parse(m.as_str()))
                    .map(Edit::ShiftVerbosity)
            }),
            Rule::new("trait", r"\bbe\s+(more|less)\s+(\w+)", |caps| {
                let direction = caps.get(1).and_then(|m| Direction::parse(m.as_str()))?;
                let trait_name = group(caps, 2)?;
                Some(Edit::AdjustTrait {
                    direction,
                    trait_name,
                })
            }),
        ]
    })
}
