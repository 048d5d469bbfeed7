//! Data Models
//!
//! The entity graph handed to the query engine by the sync collaborator:
//!
//! - `Note` - a text note or a checklist (`NoteBody::List`)
//! - `ListItem` - one checkable entry of a List
//! - `Label` - account-wide tag referenced by notes
//! - `Color` - the fixed note color palette
//! - `EntityGraph` - ordered notes and labels with id indexes
//!
//! The graph is only ever read by the core.

mod color;
mod graph;
mod label;
mod note;

pub use color::Color;
pub use graph::EntityGraph;
pub use label::Label;
pub use note::{ListItem, Note, NoteBody, NoteType, Timestamps};
