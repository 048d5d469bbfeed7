//! Result records returned by `NoteQueryEngine`
//!
//! These serialize to the exact JSON shapes the RPC tools return.

use crate::models::{Color, Label, ListItem, Note, NoteType, Timestamps};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// One row of a listing or search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub note_id: String,
    pub title: String,
    pub note_type: NoteType,
    pub pinned: bool,
    pub archived: bool,
    pub color: Color,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            note_id: note.id.clone(),
            title: note.title.clone(),
            note_type: note.note_type(),
            pinned: note.pinned,
            archived: note.archived,
            color: note.color,
        }
    }
}

/// Sentinel appended to a listing that stopped at its limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationNotice {
    pub truncated: bool,
    pub message: String,
}

impl TruncationNotice {
    pub fn new(limit: usize) -> Self {
        Self {
            truncated: true,
            message: format!("Results limited to {} notes", limit),
        }
    }
}

/// Result of `list_notes` / `search_notes`
///
/// Serializes as a flat JSON array: the summaries followed by the truncation
/// sentinel when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListing {
    pub notes: Vec<NoteSummary>,
    pub truncated: Option<TruncationNotice>,
}

impl NoteListing {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated.is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.notes.iter().map(|n| n.note_id.as_str()).collect()
    }
}

impl Serialize for NoteListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.notes.len() + usize::from(self.truncated.is_some());
        let mut seq = serializer.serialize_seq(Some(len))?;
        for note in &self.notes {
            seq.serialize_element(note)?;
        }
        if let Some(notice) = &self.truncated {
            seq.serialize_element(notice)?;
        }
        seq.end()
    }
}

/// `{id, name}` reference attached to a note detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLabel {
    pub id: String,
    pub name: String,
}

impl From<&Label> for NoteLabel {
    fn from(label: &Label) -> Self {
        Self {
            id: label.id.clone(),
            name: label.name.clone(),
        }
    }
}

/// ISO-8601 instants of a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampView {
    pub created: String,
    pub updated: String,
    pub edited: String,
}

impl From<&Timestamps> for TimestampView {
    fn from(ts: &Timestamps) -> Self {
        Self {
            created: ts.created.to_rfc3339(),
            updated: ts.updated.to_rfc3339(),
            edited: ts.edited.to_rfc3339(),
        }
    }
}

/// Full content of one note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDetail {
    pub note_id: String,
    pub title: String,
    pub text: String,
    pub note_type: NoteType,
    pub color: Color,
    pub pinned: bool,
    pub archived: bool,
    pub labels: Vec<NoteLabel>,
    pub timestamps: TimestampView,
}

/// One entry of a List, as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemView {
    pub item_id: String,
    pub text: String,
    pub checked: bool,
    pub sort: i64,
}

impl From<&ListItem> for ListItemView {
    fn from(item: &ListItem) -> Self {
        Self {
            item_id: item.id.clone(),
            text: item.text.clone(),
            checked: item.checked,
            sort: item.sort,
        }
    }
}

/// Three views over the items of one List
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItems {
    pub list_id: String,
    pub title: String,
    pub all_items: Vec<ListItemView>,
    pub checked_items: Vec<ListItemView>,
    pub unchecked_items: Vec<ListItemView>,
}

/// `{label_id, name}` record returned by label queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub label_id: String,
    pub name: String,
}

impl From<&Label> for LabelSummary {
    fn from(label: &Label) -> Self {
        Self {
            label_id: label.id.clone(),
            name: label.name.clone(),
        }
    }
}
