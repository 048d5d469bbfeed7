//! In-memory sync client
//!
//! Serves a fixed graph, for embedding wlater with data obtained elsewhere
//! and for exercising sessions without touching disk.

use super::SyncClient;
use crate::credentials::Credentials;
use crate::error::{Result, WlaterError};
use crate::models::EntityGraph;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// `SyncClient` returning a preset graph
#[derive(Debug, Default)]
pub struct FixedSyncClient {
    graph: Mutex<EntityGraph>,
    accepted_token: Option<String>,
    authentications: AtomicUsize,
    refreshes: AtomicUsize,
}

impl FixedSyncClient {
    pub fn new(graph: EntityGraph) -> Self {
        Self {
            graph: Mutex::new(graph),
            ..Self::default()
        }
    }

    /// Only accept this master token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.accepted_token = Some(token.into());
        self
    }

    /// Graph served by subsequent calls
    pub fn replace_graph(&self, graph: EntityGraph) {
        *self.graph.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = graph;
    }

    pub fn authentications(&self) -> usize {
        self.authentications.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    fn current(&self) -> EntityGraph {
        self.graph
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SyncClient for FixedSyncClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<EntityGraph> {
        self.authentications.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = &self.accepted_token {
            if *token != credentials.master_token {
                return Err(WlaterError::authentication_failed(
                    "Token may be expired. Re-run `wlater setup` to refresh credentials.",
                ));
            }
        }
        Ok(self.current())
    }

    async fn refresh(&self, _graph: EntityGraph) -> Result<EntityGraph> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(self.current())
    }
}
