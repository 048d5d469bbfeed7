//! Snapshot-file sync client
//!
//! Loads the entity graph from a JSON export of the account instead of
//! speaking the note service's sync protocol:
//!
//! ```json
//! {
//!   "account": "me@example.com",
//!   "notes": [
//!     {"id": "n1", "note_type": "Note", "title": "Ideas", "text": "..."},
//!     {"id": "l1", "note_type": "List", "items": [{"id": "i1", "text": "milk", "checked": false, "sort": 1}]}
//!   ],
//!   "labels": [{"id": "tag.1", "name": "Work"}]
//! }
//! ```

use super::SyncClient;
use crate::credentials::Credentials;
use crate::error::{Result, WlaterError};
use crate::models::{EntityGraph, Label, Note};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk shape of a snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Account the export belongs to; unchecked when absent
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl SnapshotFile {
    pub fn into_graph(self) -> EntityGraph {
        EntityGraph::new(self.notes, self.labels)
    }
}

/// `SyncClient` reading a `SnapshotFile`
#[derive(Debug, Clone)]
pub struct SnapshotSyncClient {
    path: PathBuf,
}

impl SnapshotSyncClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<SnapshotFile> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            WlaterError::sync(format!(
                "Cannot read snapshot {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let snapshot: SnapshotFile = serde_json::from_str(&contents).map_err(|e| {
            WlaterError::sync(format!(
                "Malformed snapshot {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(
            path = %self.path.display(),
            notes = snapshot.notes.len(),
            labels = snapshot.labels.len(),
            "read snapshot"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl SyncClient for SnapshotSyncClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<EntityGraph> {
        if credentials.master_token.trim().is_empty() {
            return Err(WlaterError::authentication_failed(
                "Master token is empty. Re-run `wlater setup` to refresh credentials.",
            ));
        }

        let snapshot = self.read().await?;
        if let Some(account) = &snapshot.account {
            if !account.eq_ignore_ascii_case(&credentials.email) {
                warn!(snapshot_account = %account, "snapshot belongs to another account");
                return Err(WlaterError::authentication_failed(format!(
                    "Snapshot belongs to {}, not {}",
                    account, credentials.email
                )));
            }
        }

        Ok(snapshot.into_graph())
    }

    async fn refresh(&self, _graph: EntityGraph) -> Result<EntityGraph> {
        Ok(self.read().await?.into_graph())
    }
}
