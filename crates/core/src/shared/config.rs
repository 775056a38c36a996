use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingestion::domain::retry_policy::{ExponentialBackoff, RetryPolicy};
use crate::ingestion::domain::table_ref::TableRef;
use crate::shared::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BACKOFF_BASE_MS, DEFAULT_BACKOFF_MAX_MS,
    DEFAULT_NUM_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, STORAGE_ENDPOINT, VISION_ENDPOINT,
    WAREHOUSE_ENDPOINT,
};

pub const ENV_ACCESS_TOKEN: &str = "FACESINK_ACCESS_TOKEN";
pub const ENV_BUCKET: &str = "FACESINK_BUCKET";
pub const ENV_PROJECT: &str = "FACESINK_PROJECT";
pub const ENV_DATASET: &str = "FACESINK_DATASET";
pub const ENV_TABLE: &str = "FACESINK_TABLE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Service endpoints, destinations and retry settings.
///
/// Every field is optional in the file; absent fields take their defaults.
/// Precedence is applied by the callers: command-line flag, then
/// environment, then file, then default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vision_endpoint: String,
    pub warehouse_endpoint: String,
    pub storage_endpoint: String,
    pub request_timeout_secs: u64,
    pub access_token: Option<String>,
    pub bucket: Option<String>,
    pub project_id: Option<String>,
    pub dataset_id: Option<String>,
    pub table_id: Option<String>,
    pub num_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision_endpoint: VISION_ENDPOINT.to_string(),
            warehouse_endpoint: WAREHOUSE_ENDPOINT.to_string(),
            storage_endpoint: STORAGE_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            access_token: None,
            bucket: None,
            project_id: None,
            dataset_id: None,
            table_id: None,
            num_retries: DEFAULT_NUM_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
            backoff_max_ms: DEFAULT_BACKOFF_MAX_MS,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given (it must exist), otherwise the default
    /// location if a file is there, otherwise built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Overrides fields from environment variables found via `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty(ENV_ACCESS_TOKEN) {
            self.access_token = Some(v);
        }
        if let Some(v) = non_empty(ENV_BUCKET) {
            self.bucket = Some(v);
        }
        if let Some(v) = non_empty(ENV_PROJECT) {
            self.project_id = Some(v);
        }
        if let Some(v) = non_empty(ENV_DATASET) {
            self.dataset_id = Some(v);
        }
        if let Some(v) = non_empty(ENV_TABLE) {
            self.table_id = Some(v);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn table_ref(&self) -> Result<TableRef, ConfigError> {
        Ok(TableRef::new(
            self.project_id.clone().ok_or(ConfigError::Missing("project_id"))?,
            self.dataset_id.clone().ok_or(ConfigError::Missing("dataset_id"))?,
            self.table_id.clone().ok_or(ConfigError::Missing("table_id"))?,
        ))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.num_retries,
            Box::new(ExponentialBackoff::new(
                Duration::from_millis(self.backoff_base_ms),
                Duration::from_millis(self.backoff_max_ms),
            )),
        )
    }
}
