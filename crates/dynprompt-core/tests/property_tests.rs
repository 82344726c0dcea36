#![allow(clippy::unwrap_used, clippy::expect_used)]

use dynprompt_core::modifier::{apply, parse};
use dynprompt_core::{compute_diff, DiffReport, PromptManager, MAX_HISTORY};
use proptest::prelude::*;
use regex::Regex;

fn sentence_count(doc: &str) -> u64 {
    let re = Regex::new(r"DEFAULT (\d+) SENTENCES?").unwrap();
    re.captures(doc).unwrap()[1].parse().unwrap()
}

proptest! {
    #[test]
    fn prop_unrecognized_instruction_leaves_document_unchanged(
        doc in "[A-Za-z0-9 #.:\n]{0,200}",
        instruction in "[0-9 ,.!?]{0,40}",
    ) {
        prop_assert!(parse(&instruction).is_empty());
        prop_assert_eq!(apply(&doc, &instruction), doc);
    }

    #[test]
    fn prop_verbosity_never_drops_below_one(n in 0u64..1000, less in any::<bool>()) {
        let doc = format!("Intro\nDEFAULT {} SENTENCES\n", n);
        let instruction = if less { "make less verbose" } else { "make more verbose" };

        let count = sentence_count(&apply(&doc, instruction));

        prop_assert!(count >= 1);
        let expected = if less { n.saturating_sub(2).max(1) } else { (n + 2).max(1) };
        prop_assert_eq!(count, expected);
    }

    #[test]
    fn prop_identical_documents_are_unmodified(doc in ".{0,200}") {
        prop_assert_eq!(compute_diff(Some(&doc), Some(&doc)), DiffReport::Unmodified);
    }

    #[test]
    fn prop_differing_documents_always_report_lines(
        backup in "[AB\n]{0,12}",
        active in "[AB\n]{0,12}",
    ) {
        prop_assume!(backup != active);

        let report = compute_diff(Some(&backup), Some(&active));

        prop_assert!(report.has_changes());
    }

    #[test]
    fn prop_revert_restores_backup(doc in "[A-Za-z0-9 #.:\n]{0,200}", rule in "[a-z ]{1,20}") {
        let manager = PromptManager::in_memory("prompt");
        manager.load(&doc, false).unwrap();
        manager.modify(&format!("add rule: {}", rule), "prop").unwrap();
        manager.modify("make more verbose and be less formal", "prop").unwrap();

        manager.revert().unwrap();

        prop_assert_eq!(manager.active().unwrap(), Some(doc));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_history_is_bounded(entries in 0usize..150) {
        let manager = PromptManager::in_memory("prompt");
        manager.load("Doc\n", false).unwrap();
        for i in 0..entries {
            manager.modify(&format!("be more kind {}", i), "prop").unwrap();
        }

        let history = manager.history(usize::MAX).unwrap();

        prop_assert_eq!(history.len(), (entries + 1).min(MAX_HISTORY));
    }
}
