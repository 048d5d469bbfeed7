//! wlater Core
//!
//! Read-only access to Google Keep notes for AI assistants, plus the pieces
//! needed to obtain credentials in the first place.
//!
//! # Architecture
//!
//! - **Snapshot queries**: a `SyncClient` produces an in-memory `EntityGraph`;
//!   `NoteQueryEngine` answers every read synchronously against it
//! - **Explicit session**: `KeepSession` owns the graph, `LazySession` builds
//!   it once on first use
//! - **Deterministic device ids**: derived from platform and login name so the
//!   same machine always presents the same id
//! - **No writes**: nothing in this crate mutates notes
//!
//! # Modules
//!
//! - [`models`] - Notes, list items, labels, colors and the entity graph
//! - [`device_id`] - Device id derivation and validation
//! - [`query`] - `NoteQueryEngine` and its result records
//! - [`session`] - Sync collaborators and authenticated sessions
//! - [`credentials`] - Credential storage and status checks
//! - [`setup`] - Credential setup state machine
//! - [`config`] - Server configuration resolution
//! - [`mcp`] - MCP stdio server exposing the read-only tools

pub mod config;
pub mod credentials;
pub mod device_id;
pub mod error;
pub mod mcp;
pub mod models;
pub mod query;
pub mod session;
pub mod setup;

// Re-export commonly used types
pub use config::ServerConfig;
pub use credentials::{CredentialStore, Credentials, FileCredentialStore};
pub use device_id::DeviceId;
pub use error::{Result, WlaterError};
pub use models::*;
pub use query::{NoteQueryEngine, SearchQuery};
pub use session::{KeepSession, LazySession, SyncClient};
