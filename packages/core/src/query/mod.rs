//! Note Query Engine
//!
//! Read-only queries over an `EntityGraph` snapshot. Every operation is a
//! single synchronous pass over the graph; nothing here mutates it.
//!
//! # Operations
//!
//! - `list_notes` - summaries of every non-trashed note
//! - `get_note` - full detail of one note
//! - `get_list_items` - all / checked / unchecked items of a List
//! - `search_notes` - text query plus conjunctive filters
//! - `list_labels` / `find_label` - label lookups
//!
//! # Examples
//!
//! ```rust
//! use wlater_core::models::{EntityGraph, Note};
//! use wlater_core::query::NoteQueryEngine;
//!
//! let graph = EntityGraph::new(
//!     vec![Note::text("a", "Keep", ""), Note::text("b", "Gone", "").trashed()],
//!     vec![],
//! );
//! let engine = NoteQueryEngine::new(&graph);
//! assert_eq!(engine.list_notes(10).ids(), vec!["a"]);
//! ```

mod results;
mod search;

pub use results::{
    LabelSummary, ListItemView, ListItems, NoteDetail, NoteLabel, NoteListing, NoteSummary,
    TimestampView, TruncationNotice,
};
pub use search::{SearchQuery, DEFAULT_SEARCH_LIMIT};

use crate::error::{Result, WlaterError};
use crate::models::{EntityGraph, Note};
use tracing::debug;

/// Default result cap for `list_notes`
pub const DEFAULT_LIST_LIMIT: usize = 1000;

/// Query engine borrowing a graph snapshot
#[derive(Debug, Clone, Copy)]
pub struct NoteQueryEngine<'g> {
    graph: &'g EntityGraph,
}

impl<'g> NoteQueryEngine<'g> {
    pub fn new(graph: &'g EntityGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g EntityGraph {
        self.graph
    }

    /// Summaries of every non-trashed note, in graph order, capped at `limit`
    pub fn list_notes(&self, limit: usize) -> NoteListing {
        let listing = collect_limited(self.graph.notes().iter().filter(|n| !n.trashed), limit);
        debug!(
            count = listing.len(),
            truncated = listing.is_truncated(),
            "listed notes"
        );
        listing
    }

    /// Full detail of one note
    ///
    /// # Errors
    ///
    /// `NotFound` when no note has this id.
    pub fn get_note(&self, note_id: &str) -> Result<NoteDetail> {
        let note = self
            .graph
            .note(note_id)
            .ok_or_else(|| WlaterError::note_not_found(note_id))?;

        Ok(NoteDetail {
            note_id: note.id.clone(),
            title: note.title.clone(),
            text: note.body_text().into_owned(),
            note_type: note.note_type(),
            color: note.color,
            pinned: note.pinned,
            archived: note.archived,
            labels: self.graph.labels_of(note).map(NoteLabel::from).collect(),
            timestamps: (&note.timestamps).into(),
        })
    }

    /// Items of a List, with checked and unchecked partitions
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `WrongType` when the note is not a List.
    pub fn get_list_items(&self, list_id: &str) -> Result<ListItems> {
        let note = self
            .graph
            .note(list_id)
            .ok_or_else(|| WlaterError::list_not_found(list_id))?;
        let items = note
            .items()
            .ok_or_else(|| WlaterError::wrong_type(list_id))?;

        let all_items: Vec<ListItemView> = items.iter().map(ListItemView::from).collect();
        let (checked_items, unchecked_items): (Vec<_>, Vec<_>) =
            all_items.iter().cloned().partition(|item| item.checked);

        Ok(ListItems {
            list_id: list_id.to_string(),
            title: note.title.clone(),
            all_items,
            checked_items,
            unchecked_items,
        })
    }

    /// Filtered search
    ///
    /// The base set is every note whose title or body contains the text query,
    /// or every note when the query is empty. Trashed notes are only filtered
    /// out when `trashed` is set explicitly.
    pub fn search_notes(&self, query: &SearchQuery) -> NoteListing {
        let text = query.text_query();
        let candidates = self
            .graph
            .notes()
            .iter()
            .filter(|note| text.map_or(true, |t| search::text_matches(note, t)))
            .filter(|note| query.matches(self.graph, note));

        let listing = collect_limited(candidates, query.limit);
        debug!(
            count = listing.len(),
            truncated = listing.is_truncated(),
            has_text = text.is_some(),
            "searched notes"
        );
        listing
    }

    /// Non-deleted labels sorted case-insensitively by name (stable on ties)
    pub fn list_labels(&self) -> Vec<LabelSummary> {
        let mut labels: Vec<LabelSummary> = self
            .graph
            .labels()
            .iter()
            .filter(|label| !label.deleted)
            .map(LabelSummary::from)
            .collect();
        labels.sort_by_cached_key(|label| label.name.to_lowercase());
        labels
    }

    /// First label whose name equals `name` case-insensitively
    ///
    /// Absence is a valid answer, not an error.
    pub fn find_label(&self, name: &str) -> Option<LabelSummary> {
        let wanted = name.to_lowercase();
        self.graph
            .labels()
            .iter()
            .find(|label| label.name.to_lowercase() == wanted)
            .map(LabelSummary::from)
    }
}

/// Take at most `limit` summaries, flagging truncation when more remain
fn collect_limited<'a>(mut candidates: impl Iterator<Item = &'a Note>, limit: usize) -> NoteListing {
    let notes = candidates
        .by_ref()
        .take(limit)
        .map(NoteSummary::from)
        .collect();
    let truncated = candidates.next().map(|_| TruncationNotice::new(limit));
    NoteListing { notes, truncated }
}
