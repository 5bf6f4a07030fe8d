use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::loader::{DEFAULT_GROUPS_PATH, REQUEST_TIMEOUT};

pub const DEFAULT_SOURCE: &str = "demos/data";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
/// Empty entries are dropped.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Runtime configuration, read from `NEWSMAP_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL or local directory holding the group list and group details.
    pub source: String,
    pub groups_path: String,
    pub timeout: Duration,
    pub log_dir: PathBuf,
    /// Item titles collapsed at startup.
    pub collapsed: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            groups_path: DEFAULT_GROUPS_PATH.to_string(),
            timeout: REQUEST_TIMEOUT,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            collapsed: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let timeout = match env::var("NEWSMAP_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("NEWSMAP_TIMEOUT_SECS is not a number: {}", raw))?,
            ),
            Err(_) => defaults.timeout,
        };

        Ok(Self {
            source: env::var("NEWSMAP_SOURCE").unwrap_or(defaults.source),
            groups_path: env::var("NEWSMAP_GROUPS_PATH").unwrap_or(defaults.groups_path),
            timeout,
            log_dir: env::var("NEWSMAP_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            collapsed: get_env_var_as_vec("NEWSMAP_COLLAPSED", ';'),
        })
    }
}
