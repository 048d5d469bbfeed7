//! Runtime configuration
//!
//! Resolved once at startup: explicit values first, then the `WLATER_CONFIG`
//! and `WLATER_SNAPSHOT` environment variables, then defaults under
//! `~/.wlater/`.

use crate::credentials::CREDENTIALS_FILE;
use crate::error::{Result, WlaterError};
use crate::query::{DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the credentials path
pub const CONFIG_ENV: &str = "WLATER_CONFIG";

/// Environment variable overriding the snapshot path
pub const SNAPSHOT_ENV: &str = "WLATER_SNAPSHOT";

/// Snapshot file name inside the config directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Settings for the MCP server process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Credentials JSON file
    pub credentials_path: PathBuf,

    /// Entity graph snapshot read by the snapshot sync client
    pub snapshot_path: PathBuf,

    /// Cap for `list_all_notes`
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Default cap for `search_notes` when the caller gives none
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl ServerConfig {
    /// Config rooted at an explicit directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            credentials_path: dir.join(CREDENTIALS_FILE),
            snapshot_path: dir.join(SNAPSHOT_FILE),
            list_limit: DEFAULT_LIST_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Resolve from overrides, environment, then home-directory defaults
    pub fn resolve(
        credentials_override: Option<PathBuf>,
        snapshot_override: Option<PathBuf>,
    ) -> Result<Self> {
        let credentials_path = credentials_override.or_else(|| env_path(CONFIG_ENV));
        let snapshot_path = snapshot_override.or_else(|| env_path(SNAPSHOT_ENV));

        let (credentials_path, snapshot_path) = match (credentials_path, snapshot_path) {
            (Some(credentials), Some(snapshot)) => (credentials, snapshot),
            (credentials, snapshot) => {
                let dir = default_config_dir()?;
                (
                    credentials.unwrap_or_else(|| dir.join(CREDENTIALS_FILE)),
                    snapshot.unwrap_or_else(|| dir.join(SNAPSHOT_FILE)),
                )
            }
        };

        Ok(Self {
            credentials_path,
            snapshot_path,
            list_limit: DEFAULT_LIST_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }
}

/// `~/.wlater`
pub fn default_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WlaterError::not_configured("Cannot determine home directory"))?;
    Ok(home.join(".wlater"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
