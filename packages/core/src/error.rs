//! Core Error Types
//!
//! Every fallible operation in the core reports one of these kinds. The MCP
//! layer maps each kind onto a JSON-RPC error code (see `mcp::types`).

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core
pub type Result<T, E = WlaterError> = std::result::Result<T, E>;

/// Errors surfaced by the core
#[derive(Error, Debug)]
pub enum WlaterError {
    /// Malformed device id or derivation input, or an unusable credential file
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown note or list id
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// List-item access on a note that is not a List
    #[error("Note {id} is not a List type")]
    WrongType { id: String },

    /// Rejected by the sync collaborator; never retried here
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Credential store is empty
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Transient failure talking to the sync collaborator
    #[error("Sync failed: {0}")]
    Sync(String),

    /// Filesystem failure with the offending path
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WlaterError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a not found error for a note
    pub fn note_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Note",
            id: id.into(),
        }
    }

    /// Create a not found error for a list
    pub fn list_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "List",
            id: id.into(),
        }
    }

    /// Create a wrong type error
    pub fn wrong_type(id: impl Into<String>) -> Self {
        Self::WrongType { id: id.into() }
    }

    /// Create an authentication failed error
    pub fn authentication_failed(msg: impl Into<String>) -> Self {
        Self::AuthenticationFailed(msg.into())
    }

    /// Create a not configured error
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    /// Create a sync error
    pub fn sync(msg: impl Into<String>) -> Self {
        Self::Sync(msg.into())
    }

    /// Create an I/O error tagged with a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
