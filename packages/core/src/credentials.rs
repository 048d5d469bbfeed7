//! Credential Store
//!
//! Holds the `(email, master_token, device_id)` triple produced by the setup
//! flow and consumed when a session authenticates.
//!
//! Credentials live in a JSON file (`~/.wlater/credentials.json` by default):
//!
//! ```json
//! {
//!   "email": "me@example.com",
//!   "master_token": "aas_et/...",
//!   "device_id": "776c610246edd49c"
//! }
//! ```
//!
//! A missing file means "not configured"; a file that exists but cannot be
//! used is invalid input. The two conditions stay distinguishable.

use crate::device_id::DeviceId;
use crate::error::{Result, WlaterError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// File name inside the config directory
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Authentication material for one account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub master_token: String,
    pub device_id: DeviceId,
}

impl Credentials {
    pub fn new(email: impl Into<String>, master_token: impl Into<String>, device_id: DeviceId) -> Self {
        Self {
            email: email.into(),
            master_token: master_token.into(),
            device_id,
        }
    }

    /// Reject blank fields; the device id is validated by its type
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(WlaterError::invalid_input("Credentials are missing an email"));
        }
        if self.master_token.trim().is_empty() {
            return Err(WlaterError::invalid_input(
                "Credentials are missing a master token",
            ));
        }
        Ok(())
    }
}

// The master token never reaches logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("master_token", &"<redacted>")
            .field("device_id", &self.device_id)
            .finish()
    }
}

/// Source and sink of credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// # Errors
    ///
    /// `NotConfigured` when nothing is stored, `InvalidInput` when what is
    /// stored is unusable.
    async fn load(&self) -> Result<Credentials>;

    async fn save(&self, credentials: &Credentials) -> Result<()>;
}

/// Outcome of `check_credentials`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
}

/// Report whether credentials are present and well-formed, without authenticating
pub async fn check_credentials(store: &dyn CredentialStore) -> CredentialStatus {
    match store.load().await {
        Ok(credentials) => CredentialStatus {
            configured: true,
            email: Some(credentials.email),
            message: "Credentials found and valid".to_string(),
        },
        Err(WlaterError::NotConfigured(reason)) => CredentialStatus {
            configured: false,
            email: None,
            message: format!("{}. Run `wlater setup` first.", reason),
        },
        Err(e) => CredentialStatus {
            configured: false,
            email: None,
            message: format!("Error loading credentials: {}", e),
        },
    }
}

/// JSON file backed credential store
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credentials> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WlaterError::not_configured(format!(
                    "Config file not found: {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(WlaterError::io(&self.path, e)),
        };

        let credentials: Credentials = serde_json::from_str(&contents).map_err(|e| {
            WlaterError::invalid_input(format!(
                "Invalid credentials file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        credentials.validate()?;

        debug!(path = %self.path.display(), email = %credentials.email, "loaded credentials");
        Ok(credentials)
    }

    /// Atomic write: temp file then rename, owner-only permissions on Unix
    async fn save(&self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| WlaterError::io(parent, e))?;
        }

        let serialized = serde_json::to_string_pretty(credentials)?;
        let temp_path = self.path.with_extension("json.tmp");

        // Never reuse a stale temp file
        match fs::remove_file(&temp_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(WlaterError::io(&temp_path, e)),
        }

        let file = open_private(&temp_path)
            .await
            .map_err(|e| WlaterError::io(&temp_path, e))?;

        if let Err(e) = write_then_rename(file, serialized.as_bytes(), &temp_path, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp credentials file");
            }
            return Err(WlaterError::io(&self.path, e));
        }

        info!(path = %self.path.display(), "saved credentials");
        Ok(())
    }
}

/// Credential store held in memory
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: tokio::sync::RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: tokio::sync::RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Credentials> {
        self.credentials
            .read()
            .await
            .clone()
            .ok_or_else(|| WlaterError::not_configured("No credentials stored"))
    }

    async fn save(&self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;
        *self.credentials.write().await = Some(credentials.clone());
        Ok(())
    }
}

/// Create `path` exclusively, readable by the owner only on Unix
async fn open_private(path: &Path) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path).await
}

async fn write_then_rename(
    mut file: fs::File,
    contents: &[u8],
    temp_path: &Path,
    path: &Path,
) -> std::io::Result<()> {
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(temp_path, path).await
}
