//! Search filter
//!
//! Built with the `with_*` methods:
//!
//! ```rust
//! use wlater_core::models::Color;
//! use wlater_core::query::SearchQuery;
//!
//! let query = SearchQuery::new()
//!     .with_text("budget")
//!     .with_pinned(true)
//!     .with_colors([Color::Red, Color::Blue])
//!     .with_limit(10);
//! assert_eq!(query.limit, 10);
//! ```

use crate::models::{Color, EntityGraph, Note};

/// Default result cap for `search_notes`
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Optional constraints for `search_notes`; omitted fields do not constrain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring looked up in title and body; empty means "every note"
    pub text: Option<String>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
    pub trashed: Option<bool>,

    /// Keep notes whose color is any of these
    pub colors: Option<Vec<Color>>,

    /// Keep notes carrying at least one label with any of these exact names
    pub labels: Option<Vec<String>>,

    pub limit: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text: None,
            pinned: None,
            archived: None,
            trashed: None,
            colors: None,
            labels: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn with_trashed(mut self, trashed: bool) -> Self {
        self.trashed = Some(trashed);
        self
    }

    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors = Some(colors.into_iter().collect());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Non-empty text query, if any
    pub(crate) fn text_query(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Whether a note passes every filter (the text query excluded)
    pub(crate) fn matches(&self, graph: &EntityGraph, note: &Note) -> bool {
        if self.pinned.is_some_and(|p| note.pinned != p) {
            return false;
        }
        if self.archived.is_some_and(|a| note.archived != a) {
            return false;
        }
        if self.trashed.is_some_and(|t| note.trashed != t) {
            return false;
        }

        // An empty set is treated like an omitted one
        if let Some(colors) = self.colors.as_ref().filter(|c| !c.is_empty()) {
            if !colors.contains(&note.color) {
                return false;
            }
        }

        if let Some(wanted) = self.labels.as_ref().filter(|l| !l.is_empty()) {
            let has_any = graph
                .labels_of(note)
                .any(|label| wanted.iter().any(|name| *name == label.name));
            if !has_any {
                return false;
            }
        }

        true
    }
}

/// Case-sensitive substring match against title or body
pub(crate) fn text_matches(note: &Note, query: &str) -> bool {
    note.title.contains(query) || note.body_text().contains(query)
}
