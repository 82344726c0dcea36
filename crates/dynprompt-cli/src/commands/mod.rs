//! Subcommand implementations

pub mod clear;
pub mod diff;
pub mod history;
pub mod load;
pub mod metadata;
pub mod modify;
pub mod revert;
pub mod show;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dynprompt_core::logging_facility;
use dynprompt_core::PromptManager;
use dynprompt_source::SourceLoader;
use dynprompt_store::{Settings, SqliteStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Manager opened from settings plus command-line overrides
pub struct Context {
    pub manager: PromptManager<Arc<SqliteStore>>,
}

impl Context {
    pub fn open(
        db: Option<PathBuf>,
        namespace: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Settings::load()?;
        if let Some(db) = db {
            settings.db_path = db;
        }
        if let Some(namespace) = namespace {
            settings.namespace = namespace;
        }
        logging_facility::init(settings.profile()?);

        let store = Arc::new(SqliteStore::open(&settings.db_path)?);
        let loader = SourceLoader::new(Duration::from_secs(settings.http_timeout_secs));
        let manager =
            PromptManager::new(store, &settings.namespace).with_source(Box::new(loader));
        tracing::debug!(
            db_path = %settings.db_path.display(),
            namespace = %settings.namespace,
            "opened prompt store"
        );
        Ok(Self { manager })
    }
}
