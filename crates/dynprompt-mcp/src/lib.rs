//! DynPrompt MCP - line-delimited JSON request/response server
//!
//! Each input line is one request object `{"method": ..., "params": {...}}`;
//! each produces exactly one JSON response line. Blank lines are skipped.

pub mod protocol;
pub mod request_log;
pub mod server;

pub use protocol::McpRequest;
pub use request_log::{RequestLog, RequestRecord};
pub use server::PromptServer;

/// Version reported by `get_metadata` and `health_check`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
