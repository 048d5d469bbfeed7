//! Note Data Structures
//!
//! A note is either free text or a checklist. The distinction is carried by
//! the `NoteBody` variant itself, so list-item access never needs a runtime
//! type check beyond matching on the body.
//!
//! # Examples
//!
//! ```rust
//! use wlater_core::models::{Color, ListItem, Note, NoteType};
//!
//! let note = Note::text("n1", "Groceries", "milk, eggs").with_color(Color::Yellow);
//! assert_eq!(note.note_type(), NoteType::Note);
//!
//! let list = Note::list(
//!     "l1",
//!     "Packing",
//!     vec![ListItem::new("i1", "passport", true, 2), ListItem::new("i2", "charger", false, 1)],
//! );
//! assert_eq!(list.body_text(), "☑ passport\n☐ charger");
//! ```

use super::Color;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Type tag exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    Note,
    List,
}

impl NoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteType::Note => "Note",
            NoteType::List => "List",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a note, tagged by `note_type` in serialized form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "note_type")]
pub enum NoteBody {
    #[serde(rename = "Note")]
    Text {
        #[serde(default)]
        text: String,
    },
    List {
        #[serde(default)]
        items: Vec<ListItem>,
    },
}

/// One checkable entry of a List note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub checked: bool,

    /// Ordering key assigned by the service; carried through untouched
    #[serde(default)]
    pub sort: i64,
}

impl ListItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, checked: bool, sort: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            checked,
            sort,
        }
    }
}

/// Creation and modification instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamps {
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub edited: DateTime<Utc>,
}

impl Timestamps {
    /// All three instants set to the same moment
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            created: instant,
            updated: instant,
            edited: instant,
        }
    }
}

/// A single note or list owned by the sync collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(flatten)]
    pub body: NoteBody,

    #[serde(default)]
    pub pinned: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub trashed: bool,

    #[serde(default)]
    pub color: Color,

    /// Ids of attached labels (references into the graph's label set)
    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub timestamps: Timestamps,
}

impl Note {
    /// Create a free-text note
    pub fn text(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_body(id, title, NoteBody::Text { text: text.into() })
    }

    /// Create a List note
    pub fn list(id: impl Into<String>, title: impl Into<String>, items: Vec<ListItem>) -> Self {
        Self::with_body(id, title, NoteBody::List { items })
    }

    fn with_body(id: impl Into<String>, title: impl Into<String>, body: NoteBody) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body,
            pinned: false,
            archived: false,
            trashed: false,
            color: Color::Default,
            labels: Vec::new(),
            timestamps: Timestamps::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_label(mut self, label_id: impl Into<String>) -> Self {
        self.labels.push(label_id.into());
        self
    }

    pub fn with_timestamps(mut self, timestamps: Timestamps) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }

    pub fn note_type(&self) -> NoteType {
        match self.body {
            NoteBody::Text { .. } => NoteType::Note,
            NoteBody::List { .. } => NoteType::List,
        }
    }

    /// Items of a List note, `None` for text notes
    pub fn items(&self) -> Option<&[ListItem]> {
        match &self.body {
            NoteBody::List { items } => Some(items),
            NoteBody::Text { .. } => None,
        }
    }

    /// Textual body; List items render one per line with a checkbox glyph
    pub fn body_text(&self) -> Cow<'_, str> {
        match &self.body {
            NoteBody::Text { text } => Cow::Borrowed(text.as_str()),
            NoteBody::List { items } => Cow::Owned(
                items
                    .iter()
                    .map(|item| {
                        let mark = if item.checked { '☑' } else { '☐' };
                        format!("{} {}", mark, item.text)
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }
}
