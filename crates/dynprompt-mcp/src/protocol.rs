//! Typed requests parsed from `(method, params)`

use dynprompt_core::errors::{ExError, ExErrorKind};
use dynprompt_core::DEFAULT_HISTORY_LIMIT;
use serde_json::Value;

/// Actor recorded for modifications that do not name a user
pub const DEFAULT_MCP_ACTOR: &str = "mcp_client";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpRequest {
    LoadPrompt { source: String, force: bool },
    GetActivePrompt,
    ModifyPrompt { instruction: String, user_id: String },
    RevertPrompt,
    ShowDiff,
    GetHistory { limit: usize },
    ClearPrompts,
    GetMetadata,
    HealthCheck,
}

fn str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

fn missing(what: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("parse_request")
        .with_key(what)
        .with_message(format!("No {} provided", what))
}

impl McpRequest {
    /// Parse a method name and its params
    ///
    /// Absent optional params fall back to their defaults; a missing
    /// `source` or `instruction` is an `InvalidInput` error.
    pub fn parse(method: &str, params: &Value) -> Result<Self, ExError> {
        let request = match method {
            "load_prompt" => McpRequest::LoadPrompt {
                source: str_param(params, "source")
                    .ok_or_else(|| missing("source"))?
                    .to_string(),
                force: params.get("force").and_then(Value::as_bool).unwrap_or(false),
            },
            "get_active_prompt" => McpRequest::GetActivePrompt,
            "modify_prompt" => McpRequest::ModifyPrompt {
                instruction: str_param(params, "instruction")
                    .ok_or_else(|| missing("instruction"))?
                    .to_string(),
                user_id: str_param(params, "user_id")
                    .unwrap_or(DEFAULT_MCP_ACTOR)
                    .to_string(),
            },
            "revert_prompt" => McpRequest::RevertPrompt,
            "show_diff" => McpRequest::ShowDiff,
            "get_history" => McpRequest::GetHistory {
                limit: params
                    .get("limit")
                    .and_then(Value::as_u64)
                    .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
                    .unwrap_or(DEFAULT_HISTORY_LIMIT),
            },
            "clear_prompts" => McpRequest::ClearPrompts,
            "get_metadata" => McpRequest::GetMetadata,
            "health_check" => McpRequest::HealthCheck,
            other => {
                return Err(ExError::new(ExErrorKind::UnknownMethod)
                    .with_op("parse_request")
                    .with_message(format!("Unknown method: {}", other)))
            }
        };
        Ok(request)
    }

    /// Operation name used in logs and failure messages
    pub fn method(&self) -> &'static str {
        match self {
            McpRequest::LoadPrompt { .. } => "load_prompt",
            McpRequest::GetActivePrompt => "get_active_prompt",
            McpRequest::ModifyPrompt { .. } => "modify_prompt",
            McpRequest::RevertPrompt => "revert_prompt",
            McpRequest::ShowDiff => "show_diff",
            McpRequest::GetHistory { .. } => "get_history",
            McpRequest::ClearPrompts => "clear_prompts",
            McpRequest::GetMetadata => "get_metadata",
            McpRequest::HealthCheck => "health_check",
        }
    }
}
