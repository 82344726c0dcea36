//! Runtime settings
//!
//! Precedence, lowest first: built-in defaults, `dynprompt.toml` in the
//! working directory (optional), `DYNPROMPT_*` environment variables. A
//! `.env` file is loaded into the environment before reading.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use dynprompt_core::core_types::schema::DEFAULT_NAMESPACE;
use dynprompt_core::errors::{PromptError, Result};
use dynprompt_core::logging_facility::Profile;
use serde::Deserialize;

pub const DEFAULT_DB_PATH: &str = ".dynprompt/store.db";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const CONFIG_FILE: &str = "dynprompt";
const ENV_PREFIX: &str = "DYNPROMPT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub namespace: String,
    pub log_profile: String,
    pub http_timeout_secs: u64,
    /// JSONL file the server appends one record per request to
    #[serde(default)]
    pub request_log: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_profile: "development".to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            request_log: None,
        }
    }
}

fn invalid(err: config::ConfigError) -> PromptError {
    PromptError::InvalidInput {
        reason: format!("configuration: {}", err),
    }
}

impl Settings {
    /// Load from `.env`, `dynprompt.toml` and the environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load with an explicit settings file in place of `dynprompt.toml`
    pub fn load_from(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::build(File::from(path).required(true))
    }

    fn build<F>(file: F) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();
        Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)
            .and_then(|b| b.set_default("namespace", defaults.namespace))
            .and_then(|b| b.set_default("log_profile", defaults.log_profile))
            .and_then(|b| b.set_default("http_timeout_secs", defaults.http_timeout_secs as i64))
            .map_err(invalid)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(invalid)?
            .try_deserialize()
            .map_err(invalid)
    }

    /// Parsed logging profile
    pub fn profile(&self) -> Result<Profile> {
        self.log_profile
            .parse()
            .map_err(|reason| PromptError::InvalidInput { reason })
    }
}
