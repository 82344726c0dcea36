//! Structured edits and their document transforms
//!
//! Each transform is a pure function over document text. Sections are located
//! by pattern; the document is never parsed into a tree.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::text;

/// Direction of a relative adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    More,
    Less,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::More => "more",
            Direction::Less => "less",
        }
    }

    pub(crate) fn parse(word: &str) -> Option<Self> {
        match word {
            "more" => Some(Direction::More),
            "less" => Some(Direction::Less),
            _ => None,
        }
    }
}

/// One structured document mutation recognised from an instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "edit", content = "value", rename_all = "snake_case")]
pub enum Edit {
    /// Set the `Tone:` value
    SetTone(String),
    /// Append a numbered item to the rules section
    AddRule(String),
    /// Drop every numbered item mentioning the topic
    RemoveRule(String),
    /// Set the `DEFAULT N SENTENCES` count
    SetSentenceDefault(u64),
    /// Move the sentence default by two, or add a freeform note
    ShiftVerbosity(Direction),
    /// Upsert a `Note: Be more/less <trait>.` line
    AdjustTrait {
        direction: Direction,
        trait_name: String,
    },
}

impl Edit {
    /// Short stable name of the rule that produces this edit
    pub fn rule_name(&self) -> &'static str {
        match self {
            Edit::SetTone(_) => "tone",
            Edit::AddRule(_) => "add_rule",
            Edit::RemoveRule(_) => "remove_rule",
            Edit::SetSentenceDefault(_) => "sentence_default",
            Edit::ShiftVerbosity(_) => "verbosity",
            Edit::AdjustTrait { .. } => "trait",
        }
    }

    /// Apply this edit to a document, returning the new text
    pub fn apply(&self, doc: &str) -> String {
        match self {
            Edit::SetTone(value) => set_tone(doc, value),
            Edit::AddRule(rule) => add_rule(doc, rule),
            Edit::RemoveRule(topic) => remove_rule(doc, topic),
            Edit::SetSentenceDefault(count) => set_sentence_default(doc, *count),
            Edit::ShiftVerbosity(direction) => shift_verbosity(doc, *direction),
            Edit::AdjustTrait {
                direction,
                trait_name,
            } => adjust_trait(doc, *direction, trait_name),
        }
    }
}

fn tone_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\btone:[^\n]*").expect("tone line pattern is valid"))
}

fn style_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)communication style|response style").expect("style pattern is valid")
    })
}

fn rules_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)core rules|rules|guidelines").expect("rules heading pattern is valid")
    })
}

fn sentence_default_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bdefault[ \t]+(\d+)[ \t]+sentences?\b")
            .expect("sentence default pattern is valid")
    })
}

fn set_tone(doc: &str, value: &str) -> String {
    let tone_line = format!("Tone: {}", text::capitalize(value.trim()));

    if tone_line_re().is_match(doc) {
        return tone_line_re()
            .replace_all(doc, NoExpand(&tone_line))
            .into_owned();
    }

    let lines = text::lines(doc);
    if let Some(heading) = lines.iter().position(|l| style_heading_re().is_match(l)) {
        return text::insert_after(&lines, heading, &tone_line);
    }

    text::append_block(doc, &tone_line)
}

/// Lines that look like a heading rather than prose mentioning the keyword
fn is_heading_shaped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('#')
        || trimmed.ends_with(':')
        || trimmed.contains("RULES")
        || trimmed.contains("GUIDELINES")
}

/// Heading index and the `[start, end)` range of body lines beneath it
///
/// Blank lines directly under the heading are skipped. The body then runs
/// until the next blank line, markdown heading or `▛` banner.
fn rules_section(lines: &[&str]) -> Option<(usize, usize, usize)> {
    let candidates: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| rules_heading_re().is_match(l) && text::item_number(l).is_none())
        .map(|(i, _)| i)
        .collect();

    let heading = candidates
        .iter()
        .copied()
        .find(|&i| is_heading_shaped(lines[i]))
        .or_else(|| candidates.first().copied())?;

    let start = lines[heading + 1..]
        .iter()
        .position(|l| !text::is_blank(l))
        .map_or(lines.len(), |offset| heading + 1 + offset);

    let end = lines[start..]
        .iter()
        .position(|l| {
            text::is_blank(l) || l.trim_start().starts_with('#') || l.contains('▛')
        })
        .map_or(lines.len(), |offset| start + offset);

    Some((heading, start, end))
}

fn add_rule(doc: &str, rule: &str) -> String {
    let rule = rule.trim();
    let lines = text::lines(doc);

    let Some((heading, start, end)) = rules_section(&lines) else {
        return text::append_block(doc, &format!("## RULES\n1. {}", rule));
    };

    let next = lines[start..end]
        .iter()
        .filter_map(|l| text::item_number(l))
        .max()
        .map_or(1, |max| max.saturating_add(1));

    // last body line, or the heading itself when the section is empty
    let anchor = if end > start { end - 1 } else { heading };
    text::insert_after(&lines, anchor, &format!("{}. {}", next, rule))
}

fn remove_rule(doc: &str, topic: &str) -> String {
    let topic = topic.trim().to_lowercase();
    if topic.is_empty() {
        return doc.to_string();
    }

    text::lines(doc)
        .into_iter()
        .filter(|line| {
            !text::item_text(line)
                .map(|item| item.to_lowercase().contains(&topic))
                .unwrap_or(false)
        })
        .collect()
}

fn set_sentence_default(doc: &str, count: u64) -> String {
    let line = text::sentence_default_line(count);
    if sentence_default_re().is_match(doc) {
        sentence_default_re()
            .replace_all(doc, NoExpand(&line))
            .into_owned()
    } else {
        text::append_block(doc, &line)
    }
}

fn shift_verbosity(doc: &str, direction: Direction) -> String {
    let current = sentence_default_re()
        .captures(doc)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX));

    match (current, direction) {
        (Some(count), Direction::More) => set_sentence_default(doc, count.saturating_add(2)),
        (Some(count), Direction::Less) => {
            set_sentence_default(doc, count.saturating_sub(2).max(1))
        }
        (None, Direction::More) => {
            text::append_block(doc, "Note: Provide more detailed explanations.")
        }
        (None, Direction::Less) => text::append_block(doc, "Note: Keep responses brief and concise."),
    }
}

fn adjust_trait(doc: &str, direction: Direction, trait_name: &str) -> String {
    let note = format!("Note: Be {} {}.", direction.as_str(), trait_name);
    let pattern = format!(
        r"(?i)note:[ \t]*be[ \t]+(?:more|less)[ \t]+{}\b\.?",
        regex::escape(trait_name)
    );

    match Regex::new(&pattern) {
        Ok(existing) if existing.is_match(doc) => {
            existing.replace_all(doc, NoExpand(&note)).into_owned()
        }
        _ => text::append_block(doc, &note),
    }
}
