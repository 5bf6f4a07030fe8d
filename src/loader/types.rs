//! Type definitions for the loader module.

use thiserror::Error;
use tokio::time::Duration;

/// Why a group list or group detail could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("response body was empty")]
    EmptyBody,
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
    #[error("unknown group '{0}'")]
    UnknownGroup(String),
}

// Constants
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_GROUPS_PATH: &str = "groups.json";
