//! DynPrompt MCP server
//!
//! Reads requests from stdin and writes responses to stdout. Logs go to
//! stderr.

use std::sync::Arc;
use std::time::Duration;

use dynprompt_core::logging_facility;
use dynprompt_core::PromptManager;
use dynprompt_mcp::{PromptServer, RequestLog};
use dynprompt_source::SourceLoader;
use dynprompt_store::{Settings, SqliteStore};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    logging_facility::init(settings.profile()?);

    let store = Arc::new(SqliteStore::open(&settings.db_path)?);
    let loader = SourceLoader::new(Duration::from_secs(settings.http_timeout_secs));
    let manager = PromptManager::new(store, &settings.namespace).with_source(Box::new(loader));

    let mut server = PromptServer::new(manager);
    if let Some(path) = &settings.request_log {
        server = server.with_request_log(RequestLog::new(path));
    }

    tracing::info!(db_path = %settings.db_path.display(), "store opened");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    server.run(stdin.lock(), stdout.lock())?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
