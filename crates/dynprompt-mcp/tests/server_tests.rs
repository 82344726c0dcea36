#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Cursor;
use std::sync::Arc;

use dynprompt_core::{MemoryStore, PromptManager};
use dynprompt_mcp::{PromptServer, RequestLog};
use serde_json::{json, Value};

type MemoryServer = PromptServer<Arc<MemoryStore>>;

fn server() -> MemoryServer {
    PromptServer::new(PromptManager::in_memory("prompt"))
}

fn call(server: &MemoryServer, method: &str, params: Value) -> Value {
    server.handle_request(method, &params)
}

#[test]
fn test_load_modify_diff_revert_session() {
    let server = server();

    // GIVEN a loaded prompt
    let loaded = call(&server, "load_prompt", json!({"source": "## RULES\n1. Be helpful\n"}));
    assert_eq!(loaded["success"], true);
    assert_eq!(loaded["already_loaded"], false);
    assert_eq!(loaded["loaded_size"], 23);

    // WHEN a rule is added
    let modified = call(&server, "modify_prompt", json!({"instruction": "add rule: no emojis"}));
    assert_eq!(modified["success"], true);
    assert_eq!(modified["recognized"], true);

    // THEN the diff shows the added line
    let diff = call(&server, "show_diff", json!({}));
    assert_eq!(diff["diff"], "+ 2. no emojis");
    assert_eq!(diff["has_changes"], true);

    // AND revert restores the original
    let reverted = call(&server, "revert_prompt", json!({}));
    assert_eq!(reverted["success"], true);
    let diff = call(&server, "show_diff", json!({}));
    assert_eq!(diff["diff"], "No modifications (active = original)");
    assert_eq!(diff["has_changes"], false);
}

#[test]
fn test_history_uses_default_actor() {
    let server = server();
    call(&server, "load_prompt", json!({"source": "Doc"}));
    call(&server, "modify_prompt", json!({"instruction": "be more kind"}));
    call(&server, "modify_prompt", json!({"instruction": "be less kind", "user_id": "alice"}));

    let history = call(&server, "get_history", json!({"limit": 2}));

    assert_eq!(history["count"], 2);
    assert_eq!(history["history"][0]["user_id"], "alice");
    assert_eq!(history["history"][1]["user_id"], "mcp_client");
    assert!(history["formatted"].as_str().unwrap().contains("MODIFY | alice"));
}

#[test]
fn test_outcomes_without_document() {
    let server = server();

    assert_eq!(
        call(&server, "get_active_prompt", json!({})),
        json!({
            "success": false,
            "message": "No active prompt loaded",
            "code": "ERR_NO_ACTIVE_DOCUMENT"
        })
    );
    assert_eq!(
        call(&server, "modify_prompt", json!({"instruction": "be more kind"})),
        json!({
            "success": false,
            "error": "No active prompt to modify",
            "code": "ERR_NO_ACTIVE_DOCUMENT"
        })
    );
    assert_eq!(
        call(&server, "revert_prompt", json!({})),
        json!({
            "success": false,
            "error": "No backup available",
            "code": "ERR_NO_ACTIVE_DOCUMENT"
        })
    );
    assert_eq!(call(&server, "show_diff", json!({}))["diff"], "No active prompt loaded");
}

#[test]
fn test_second_load_reports_already_loaded() {
    let server = server();
    call(&server, "load_prompt", json!({"source": "first"}));

    let second = call(&server, "load_prompt", json!({"source": "second"}));
    assert_eq!(second["already_loaded"], true);
    assert_eq!(call(&server, "get_active_prompt", json!({}))["prompt"], "first");

    let forced = call(&server, "load_prompt", json!({"source": "second", "force": true}));
    assert_eq!(forced["already_loaded"], false);
    assert_eq!(call(&server, "get_active_prompt", json!({}))["prompt"], "second");
}

#[test]
fn test_metadata_and_health() {
    let server = server();
    call(&server, "load_prompt", json!({"source": "abc"}));

    let meta = call(&server, "get_metadata", json!({}));
    assert_eq!(meta["metadata"]["active_exists"], true);
    assert_eq!(meta["metadata"]["active_size"], 3);
    assert_eq!(meta["version"], env!("CARGO_PKG_VERSION"));

    let health = call(&server, "health_check", json!({}));
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["store_connected"], true);

    let cleared = call(&server, "clear_prompts", json!({}));
    assert_eq!(cleared["success"], true);
    assert_eq!(call(&server, "get_metadata", json!({}))["metadata"]["active_exists"], false);
}

#[test]
fn test_protocol_errors() {
    let server = server();

    assert_eq!(
        call(&server, "explode", json!({})),
        json!({"error": "Unknown method: explode", "code": "ERR_UNKNOWN_METHOD"})
    );
    assert_eq!(
        call(&server, "load_prompt", json!({})),
        json!({"error": "No source provided", "code": "ERR_INVALID_INPUT"})
    );

    let bad = server.handle_line("{not json").unwrap();
    assert!(bad["error"].as_str().unwrap().starts_with("Invalid JSON: "));
    assert!(server.handle_line("   ").is_none());
}

#[test]
fn test_run_writes_one_line_per_request() {
    let server = server();
    let input = concat!(
        r#"{"method":"load_prompt","params":{"source":"Tone: Calm"}}"#,
        "\n\n",
        r#"{"method":"modify_prompt","params":{"instruction":"set tone to warm"}}"#,
        "\n",
        r#"{"method":"get_active_prompt"}"#,
        "\n"
    );
    let mut output = Vec::new();

    server.run(Cursor::new(input), &mut output).unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2]["prompt"], "Tone: Warm");
}

#[test]
fn test_request_log_records_each_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/requests.jsonl");
    let server = server().with_request_log(RequestLog::new(&path));

    call(&server, "health_check", json!({}));
    call(&server, "explode", json!({"x": 1}));

    let records: Vec<Value> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["method"], "health_check");
    assert_eq!(records[0]["success"], true);
    assert_eq!(records[1]["success"], false);
    assert_eq!(records[1]["params"]["x"], 1);
    assert_ne!(records[0]["request_id"], records[1]["request_id"]);
}

#[test]
fn test_client_request_id_is_recorded() {
    // Given a server writing a request log
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requests.jsonl");
    let server = server().with_request_log(RequestLog::new(&path));

    // When requests arrive with a string id, a numeric id and no id
    server.handle_line(r#"{"id":"req-42","method":"health_check"}"#);
    server.handle_line(r#"{"id":7,"method":"health_check"}"#);
    server.handle_line(r#"{"method":"health_check"}"#);

    // Then the client ids are kept and the last request gets a generated one
    let records: Vec<Value> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records[0]["request_id"], "req-42");
    assert_eq!(records[1]["request_id"], "7");
    let generated = records[2]["request_id"].as_str().unwrap();
    assert!(!generated.is_empty());
    assert_ne!(generated, "req-42");
}
