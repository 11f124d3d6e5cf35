// Application configuration.
// Optional JSON file in the platform config dir, overridden by environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ArborError, Result};
use crate::storage;

pub const DATA_DIR_ENV: &str = "ARBOR_DATA_DIR";
pub const LOG_FILTER_ENV: &str = "ARBOR_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the session blob and logs are kept.
    pub data_dir: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Explorer pane width in columns.
    pub explorer_width: u16,
    /// Event poll interval.
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_filter: "arbor=info".to_string(),
            explorer_width: 30,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    /// Load from the default config path and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match storage::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| ArborError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = var(LOG_FILTER_ENV).filter(|v| !v.is_empty()) {
            self.log_filter = filter;
        }
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        self.data_dir
            .clone()
            .or_else(storage::default_data_dir)
            .ok_or(ArborError::NoProjectDirs)
    }
}
