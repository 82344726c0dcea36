//! Line-level helpers shared by the edit transforms

use regex::Regex;
use std::sync::OnceLock;

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\.").expect("numbered item pattern is valid"))
}

fn numbered_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\d+\.\s+(.*)$").expect("numbered text pattern is valid")
    })
}

/// Split into lines keeping their terminators, so joining is lossless
pub(crate) fn lines(doc: &str) -> Vec<&str> {
    doc.split_inclusive('\n').collect()
}

/// Number of a `N.` item line, if the line is one
pub(crate) fn item_number(line: &str) -> Option<u64> {
    numbered_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Text of a `N. text` item line (whitespace after the dot is required)
pub(crate) fn item_text(line: &str) -> Option<&str> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    numbered_text_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Append `line` as its own block at the end of the document
///
/// A blank line separates it from existing content; the result always ends
/// with a newline.
pub(crate) fn append_block(doc: &str, line: &str) -> String {
    let mut out = String::with_capacity(doc.len() + line.len() + 3);
    out.push_str(doc);
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    out
}

/// Insert `line` after the line at `index` (terminator added where missing)
pub(crate) fn insert_after(lines: &[&str], index: usize, line: &str) -> String {
    let mut out = String::new();
    for (i, existing) in lines.iter().enumerate() {
        out.push_str(existing);
        if i == index {
            if !existing.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Upper-case the first character and lower-case the rest
pub(crate) fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `DEFAULT n SENTENCE` / `DEFAULT n SENTENCES`
pub(crate) fn sentence_default_line(count: u64) -> String {
    if count == 1 {
        "DEFAULT 1 SENTENCE".to_string()
    } else {
        format!("DEFAULT {} SENTENCES", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_lossless() {
        let doc = "a\nb\n\nc";
        assert_eq!(lines(doc).concat(), doc);
        assert_eq!(lines(doc), vec!["a\n", "b\n", "\n", "c"]);
    }

    #[test]
    fn test_item_number_and_text() {
        assert_eq!(item_number("  12. Stay calm\n"), Some(12));
        assert_eq!(item_number("Rule 3."), None);
        assert_eq!(item_text("3. No emojis\n"), Some("No emojis"));
        assert_eq!(item_text("3.No space"), None);
    }

    #[test]
    fn test_append_block_separates_with_blank_line() {
        assert_eq!(append_block("A\n", "B"), "A\n\nB\n");
        assert_eq!(append_block("A", "B"), "A\n\nB\n");
        assert_eq!(append_block("", "B"), "B\n");
    }

    #[test]
    fn test_insert_after_last_line_without_newline() {
        let doc = "head\nlast";
        assert_eq!(insert_after(&lines(doc), 1, "new"), "head\nlast\nnew\n");
        assert_eq!(insert_after(&lines(doc), 0, "new"), "head\nnew\nlast");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("sarcastic and dry"), "Sarcastic and dry");
        assert_eq!(capitalize("éLAN"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_sentence_default_line_plural() {
        assert_eq!(sentence_default_line(1), "DEFAULT 1 SENTENCE");
        assert_eq!(sentence_default_line(3), "DEFAULT 3 SENTENCES");
    }
}
