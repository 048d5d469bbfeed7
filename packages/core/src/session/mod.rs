//! Authenticated Sessions
//!
//! A `KeepSession` owns the entity graph produced by a `SyncClient` and hands
//! out a `NoteQueryEngine` over a stable snapshot of it. The hosting layer
//! constructs the session explicitly and passes it by reference; there is no
//! process-global client.
//!
//! # Architecture
//!
//! ```text
//! CredentialStore --load--> Credentials --authenticate--> SyncClient
//!                                                            |
//!                                                       EntityGraph
//!                                                            |
//!                                      KeepSession (RwLock) --with_engine--> NoteQueryEngine
//! ```
//!
//! `LazySession` adds once-per-process construction on first use, which is
//! what the MCP server needs.
//!
//! `KeepSession::refresh` is for embedders that keep a session alive across
//! account changes. The stdio server and the CLI serve the graph loaded at
//! startup and never call it; restart `wlater serve` to pick up a new
//! snapshot.

mod fixed;
mod snapshot;

pub use fixed::FixedSyncClient;
pub use snapshot::{SnapshotFile, SnapshotSyncClient};

use crate::credentials::{CredentialStore, Credentials};
use crate::error::{Result, WlaterError};
use crate::models::EntityGraph;
use crate::query::NoteQueryEngine;
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

/// Authentication and sync collaborator
///
/// Implementations perform all network or disk I/O before a graph reaches
/// the query engine.
#[async_trait]
pub trait SyncClient: Send + Sync {
    /// # Errors
    ///
    /// `AuthenticationFailed` when the credentials are rejected; `Sync` for
    /// transient transport failures.
    async fn authenticate(&self, credentials: &Credentials) -> Result<EntityGraph>;

    /// Bring a previously synced graph up to date
    async fn refresh(&self, graph: EntityGraph) -> Result<EntityGraph>;
}

/// Authenticated view of one account
pub struct KeepSession {
    email: String,
    client: Arc<dyn SyncClient>,
    graph: RwLock<EntityGraph>,
}

impl KeepSession {
    /// Authenticate and perform the initial sync
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn connect(client: Arc<dyn SyncClient>, credentials: &Credentials) -> Result<Self> {
        let graph = client.authenticate(credentials).await?;
        info!(notes = graph.note_count(), "Authenticated as {}", credentials.email);

        Ok(Self {
            email: credentials.email.clone(),
            client,
            graph: RwLock::new(graph),
        })
    }

    /// Session over an already loaded graph
    pub fn from_graph(email: impl Into<String>, client: Arc<dyn SyncClient>, graph: EntityGraph) -> Self {
        Self {
            email: email.into(),
            client,
            graph: RwLock::new(graph),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Run a query against the current snapshot
    ///
    /// The snapshot cannot change while `f` runs.
    pub fn with_engine<T>(&self, f: impl FnOnce(NoteQueryEngine<'_>) -> T) -> T {
        let graph = self.graph.read().unwrap_or_else(PoisonError::into_inner);
        f(NoteQueryEngine::new(&graph))
    }

    /// Re-sync and swap in the refreshed graph
    ///
    /// Queries running meanwhile keep reading the old snapshot. On failure the
    /// current graph is kept.
    pub async fn refresh(&self) -> Result<()> {
        let current = self
            .graph
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let refreshed = self.client.refresh(current).await?;
        let notes = refreshed.note_count();
        *self.graph.write().unwrap_or_else(PoisonError::into_inner) = refreshed;

        info!(notes, "Refreshed session for {}", self.email);
        Ok(())
    }
}

impl std::fmt::Debug for KeepSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeepSession")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Session built on first use and reused for the life of the process
///
/// A failed construction is not cached; the next call tries again.
pub struct LazySession {
    store: Arc<dyn CredentialStore>,
    client: Arc<dyn SyncClient>,
    session: OnceCell<Arc<KeepSession>>,
}

impl LazySession {
    pub fn new(store: Arc<dyn CredentialStore>, client: Arc<dyn SyncClient>) -> Self {
        Self {
            store,
            client,
            session: OnceCell::new(),
        }
    }

    /// The authenticated session, constructing it if needed
    pub async fn get(&self) -> Result<Arc<KeepSession>> {
        self.session
            .get_or_try_init(|| async {
                let credentials = self.store.load().await?;
                let session = KeepSession::connect(self.client.clone(), &credentials)
                    .await
                    .inspect_err(|e| error!("Failed to initialize session: {}", e))?;
                info!("Session initialized successfully");
                Ok::<_, WlaterError>(Arc::new(session))
            })
            .await
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.session.initialized()
    }

    pub fn credential_store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }
}
