//! Request dispatch and the stdio loop

use std::io::{BufRead, Write};

use dynprompt_core::errors::{ExError, ExErrorKind, PromptError};
use dynprompt_core::{KvStore, LoadOutcome, PromptManager};
use dynprompt_core_types::{RequestContext, RequestId};
use serde_json::{json, Value};

use crate::protocol::McpRequest;
use crate::request_log::{RequestLog, RequestRecord};
use crate::VERSION;

fn error_response(err: &ExError) -> Value {
    json!({ "error": err.message(), "code": err.code() })
}

/// Unsuccessful reply for operations that need a loaded document
fn no_document(op: &str, message: &str) -> Value {
    let ex = ExError::new(ExErrorKind::NoActiveDocument)
        .with_op(op)
        .with_message(message);
    json!({ "success": false, "error": ex.message(), "code": ex.code() })
}

/// Client-supplied `id`, string or number, used to correlate log lines
fn client_request_id(request: &Value) -> Option<RequestId> {
    match request.get("id")? {
        Value::String(id) if !id.is_empty() => Some(RequestId::from_string(id.clone())),
        Value::Number(id) => Some(RequestId::from_string(id.to_string())),
        _ => None,
    }
}

/// Wrap a manager failure with the operation that hit it
fn failure(prefix: &str, err: PromptError) -> Value {
    let ex: ExError = err.clone().into();
    let ex = ex.with_message(format!("{}: {}", prefix, err));
    error_response(&ex)
}

pub struct PromptServer<S> {
    manager: PromptManager<S>,
    request_log: Option<RequestLog>,
}

impl<S: KvStore> PromptServer<S> {
    pub fn new(manager: PromptManager<S>) -> Self {
        Self {
            manager,
            request_log: None,
        }
    }

    pub fn with_request_log(mut self, log: RequestLog) -> Self {
        self.request_log = Some(log);
        self
    }

    pub fn manager(&self) -> &PromptManager<S> {
        &self.manager
    }

    /// Serve requests until `input` is exhausted
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> std::io::Result<()> {
        tracing::info!(
            namespace = self.manager.namespace(),
            version = VERSION,
            "prompt server started"
        );
        for line in input.lines() {
            let line = line?;
            if let Some(response) = self.handle_line(&line) {
                writeln!(output, "{}", response)?;
                output.flush()?;
            }
        }
        tracing::info!("input closed; prompt server stopping");
        Ok(())
    }

    /// Handle one raw input line; `None` for blank lines
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "rejected malformed request line");
                return Some(error_response(
                    &ExError::new(ExErrorKind::InvalidInput)
                        .with_op("parse_request")
                        .with_message(format!("Invalid JSON: {}", e)),
                ));
            }
        };

        let method = request.get("method").and_then(Value::as_str).unwrap_or("");
        let params = request.get("params").cloned().unwrap_or(Value::Null);
        let ctx = match client_request_id(&request) {
            Some(id) => RequestContext::with_request_id(id),
            None => RequestContext::new(),
        };
        Some(self.respond(ctx.with_method(method), method, &params))
    }

    /// Route one request and record it
    pub fn handle_request(&self, method: &str, params: &Value) -> Value {
        self.respond(RequestContext::new().with_method(method), method, params)
    }

    fn respond(&self, ctx: RequestContext, method: &str, params: &Value) -> Value {

        let response = match McpRequest::parse(method, params) {
            Ok(request) => self.dispatch(request),
            Err(err) => error_response(&err),
        };

        let success = response.get("error").is_none();
        tracing::info!(
            request_id = %ctx.request_id,
            method = method,
            success = success,
            "handled request"
        );

        if let Some(log) = &self.request_log {
            let record = RequestRecord {
                timestamp: chrono::Utc::now().timestamp(),
                request_id: ctx.request_id.to_string(),
                method: method.to_string(),
                params: params.clone(),
                success,
            };
            if let Err(e) = log.append(&record) {
                tracing::warn!(path = %log.path().display(), error = %e, "failed to write request log");
            }
        }

        response
    }

    /// Execute a parsed request against the manager
    pub fn dispatch(&self, request: McpRequest) -> Value {
        match request {
            McpRequest::LoadPrompt { source, force } => self.load_prompt(&source, force),
            McpRequest::GetActivePrompt => self.get_active_prompt(),
            McpRequest::ModifyPrompt {
                instruction,
                user_id,
            } => self.modify_prompt(&instruction, &user_id),
            McpRequest::RevertPrompt => self.revert_prompt(),
            McpRequest::ShowDiff => self.show_diff(),
            McpRequest::GetHistory { limit } => self.get_history(limit),
            McpRequest::ClearPrompts => self.clear_prompts(),
            McpRequest::GetMetadata => self.get_metadata(),
            McpRequest::HealthCheck => self.health_check(),
        }
    }

    fn load_prompt(&self, source: &str, force: bool) -> Value {
        match self.manager.load(source, force) {
            Ok(LoadOutcome::Loaded(content)) => json!({
                "success": true,
                "source": source,
                "loaded_size": content.chars().count(),
                "already_loaded": false,
                "message": "Prompt loaded successfully",
            }),
            Ok(LoadOutcome::AlreadyLoaded(content)) => json!({
                "success": true,
                "source": source,
                "loaded_size": content.chars().count(),
                "already_loaded": true,
                "message": "Prompt already loaded; use force to overwrite",
            }),
            Err(e) => failure("Failed to load prompt", e),
        }
    }

    fn get_active_prompt(&self) -> Value {
        match self.manager.active() {
            Ok(Some(prompt)) => json!({
                "success": true,
                "size": prompt.chars().count(),
                "prompt": prompt,
            }),
            Ok(None) => json!({
                "success": false,
                "message": "No active prompt loaded",
                "code": ExErrorKind::NoActiveDocument.code(),
            }),
            Err(e) => failure("Failed to read prompt", e),
        }
    }

    fn modify_prompt(&self, instruction: &str, user_id: &str) -> Value {
        match self.manager.modify(instruction, user_id) {
            Ok(Some(m)) => json!({
                "success": true,
                "instruction": instruction,
                "new_size": m.content.chars().count(),
                "recognized": !m.is_unrecognized(),
                "edits": m.edits,
                "message": "Prompt modified successfully",
            }),
            Ok(None) => no_document("modify_prompt", "No active prompt to modify"),
            Err(e) => failure("Failed to modify prompt", e),
        }
    }

    fn revert_prompt(&self) -> Value {
        match self.manager.revert() {
            Ok(Some(backup)) => json!({
                "success": true,
                "message": "Prompt reverted to original",
                "size": backup.chars().count(),
            }),
            Ok(None) => no_document("revert_prompt", "No backup available"),
            Err(e) => failure("Failed to revert", e),
        }
    }

    fn show_diff(&self) -> Value {
        match self.manager.diff() {
            Ok(report) => json!({
                "success": true,
                "diff": dynprompt_core::render_diff(&report),
                "has_changes": report.has_changes(),
            }),
            Err(e) => failure("Failed to generate diff", e),
        }
    }

    fn get_history(&self, limit: usize) -> Value {
        let result = self.manager.history(limit).and_then(|history| {
            let formatted = self.manager.format_history(limit)?;
            Ok((history, formatted))
        });
        match result {
            Ok((history, formatted)) => json!({
                "success": true,
                "count": history.len(),
                "history": history,
                "formatted": formatted,
            }),
            Err(e) => failure("Failed to get history", e),
        }
    }

    fn clear_prompts(&self) -> Value {
        match self.manager.clear() {
            Ok(()) => json!({ "success": true, "message": "All prompts and history cleared" }),
            Err(e) => failure("Failed to clear", e),
        }
    }

    fn get_metadata(&self) -> Value {
        match self.manager.metadata() {
            Ok(metadata) => json!({
                "success": true,
                "metadata": metadata,
                "version": VERSION,
            }),
            Err(e) => failure("Failed to get metadata", e),
        }
    }

    fn health_check(&self) -> Value {
        let store_connected = self.manager.documents().exists().is_ok();
        json!({
            "success": true,
            "status": "healthy",
            "version": VERSION,
            "store_connected": store_connected,
            "timestamp": chrono::Utc::now().timestamp(),
        })
    }
}
