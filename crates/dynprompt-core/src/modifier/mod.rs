//! Instruction-to-mutation engine
//!
//! An instruction is case-folded and trimmed, then checked against every rule
//! in [`rules::rule_set`]. Rules are not mutually exclusive: each one that
//! matches contributes an [`Edit`], and the edits are folded left-to-right over
//! the document in rule order.
//!
//! ```
//! use dynprompt_core::modifier::apply;
//!
//! let doc = "## RULES\n1. Be helpful\n";
//! assert_eq!(apply(doc, "add rule: no emojis"), "## RULES\n1. Be helpful\n2. no emojis\n");
//! assert_eq!(apply(doc, "sing a song"), doc);
//! ```

pub mod edit;
pub mod rules;
mod text;

pub use edit::{Direction, Edit};
pub use rules::{rule_set, Rule};

/// Case-fold and trim an instruction before matching
pub fn normalize(instruction: &str) -> String {
    instruction.trim().to_lowercase()
}

/// Parse an instruction into the ordered list of edits it requests
///
/// Returns an empty list when no rule recognises the instruction.
pub fn parse(instruction: &str) -> Vec<Edit> {
    let normalized = normalize(instruction);
    rule_set()
        .iter()
        .filter_map(|rule| rule.matches(&normalized))
        .collect()
}

/// Apply a list of edits in order, each against the previous result
pub fn apply_edits(document: &str, edits: &[Edit]) -> String {
    edits
        .iter()
        .fold(document.to_string(), |doc, edit| edit.apply(&doc))
}

/// Apply an instruction to a document
///
/// Never fails; an unrecognised instruction yields the input unchanged.
pub fn apply(document: &str, instruction: &str) -> String {
    let edits = parse(instruction);
    if edits.is_empty() {
        tracing::debug!(instruction, "instruction matched no rule");
        return document.to_string();
    }
    tracing::debug!(
        instruction,
        edit_count = edits.len(),
        rules = ?edits.iter().map(Edit::rule_name).collect::<Vec<_>>(),
        "applying edits"
    );
    apply_edits(document, &edits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_and_trims() {
        assert_eq!(normalize("  Change Tone To WITTY \n"), "change tone to witty");
    }

    #[test]
    fn test_parse_unrecognised_is_empty() {
        assert!(parse("what's the weather like?").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_be_inside_a_word_is_not_a_trait() {
        let doc = "You are a bot.\n";
        assert!(parse("maybe more helpful").is_empty());
        assert_eq!(apply(doc, "Maybe more helpful"), doc);
    }

    #[test]
    fn test_parse_orders_edits_by_rule() {
        // trait rule is declared after tone rule, whatever the phrase order
        let edits = parse("make tone to be more formal");
        assert_eq!(
            edits,
            vec![
                Edit::SetTone("be more formal".to_string()),
                Edit::AdjustTrait {
                    direction: Direction::More,
                    trait_name: "formal".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_apply_folds_edits() {
        let doc = "Tone: Calm\nDEFAULT 4 SENTENCES\n";
        let out = apply(doc, "make less verbose and be more direct");
        assert_eq!(out, "Tone: Calm\nDEFAULT 2 SENTENCES\n\nNote: Be more direct.\n");
    }
}
