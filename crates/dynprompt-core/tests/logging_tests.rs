#![allow(clippy::unwrap_used, clippy::expect_used)]

use dynprompt_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use dynprompt_core::errors::{PromptError, Result};
use dynprompt_core::logging_facility::test_capture::init_test_capture;
use dynprompt_core::source::{DocumentSource, FetchedDocument};
use dynprompt_core::{log_op_end, log_op_error, log_op_start, PromptManager};

struct Unreachable;

impl DocumentSource for Unreachable {
    fn fetch(&self, source: &str) -> Result<FetchedDocument> {
        Err(PromptError::SourceUnavailable {
            source_ref: source.to_string(),
            reason: "timed out".to_string(),
        })
    }
}

#[test]
fn test_log_op_macros_emit_lifecycle_events() {
    let capture = init_test_capture();
    let op = "macro_lifecycle_unique_1";

    log_op_start!(op);
    log_op_end!(op, duration_ms = 42);

    capture.assert_event_exists(op, EVENT_START);
    let ends = capture.matching(op, EVENT_END);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_macros_expand_in_expression_position() {
    // Given operation outcomes that are logged straight from match arms
    let capture = init_test_capture();
    let op = "macro_expression_unique_3";
    let outcomes: [std::result::Result<usize, PromptError>; 2] =
        [Ok(5), Err(PromptError::storage("kv_get", "locked"))];

    // When each arm is the macro invocation itself
    for outcome in outcomes {
        let _started: () = log_op_start!(op, attempt = 1);
        let _logged: () = match outcome {
            Ok(chars) => log_op_end!(op, duration_ms = 2, doc_chars = chars),
            Err(err) => log_op_error!(op, err, duration_ms = 2),
        };
    }

    // Then both arms emitted their events
    let ends = capture.matching(op, EVENT_END);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("doc_chars"), Some("5"));
    assert_eq!(capture.matching(op, EVENT_END_ERROR).len(), 1);
    assert_eq!(capture.matching(op, EVENT_START).len(), 2);
}

#[test]
fn test_log_op_error_records_stable_code() {
    let capture = init_test_capture();
    let op = "macro_error_unique_2";

    log_op_error!(op, PromptError::storage("kv_set", "disk full"), duration_ms = 7);

    let errors = capture.matching(op, EVENT_END_ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err_code"), Some("ERR_PERSISTENCE"));
}

#[test]
fn test_manager_operations_are_bracketed() {
    let capture = init_test_capture();
    let manager = PromptManager::in_memory("logging-bracketed");

    manager.load("Doc\n", false).unwrap();
    manager.modify("add rule: be brief", "u1").unwrap();
    manager.revert().unwrap();

    for op in ["load", "modify", "revert"] {
        capture.assert_event_exists(op, EVENT_START);
        capture.assert_event_exists(op, EVENT_END);
    }
}

#[test]
fn test_failed_load_logs_error_event() {
    let capture = init_test_capture();
    let manager =
        PromptManager::in_memory("logging-failed-load").with_source(Box::new(Unreachable));

    let err = manager.load("https://unreachable.test/p.md", false).unwrap_err();
    assert!(matches!(err, PromptError::SourceUnavailable { .. }));

    let errors = capture.matching("load", EVENT_END_ERROR);
    assert!(errors
        .iter()
        .any(|e| e.field("err_code") == Some("ERR_SOURCE_UNAVAILABLE")));
}
