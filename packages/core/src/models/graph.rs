//! In-memory entity graph
//!
//! Produced by a `SyncClient` and treated as an immutable snapshot for the
//! duration of each query.

use super::{Label, Note};
use std::collections::HashMap;

/// Ordered notes and labels with id indexes
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    notes: Vec<Note>,
    labels: Vec<Label>,
    note_index: HashMap<String, usize>,
    label_index: HashMap<String, usize>,
}

impl EntityGraph {
    /// Build a graph, keeping the given iteration order
    ///
    /// When ids repeat, lookups resolve to the first occurrence.
    pub fn new(notes: Vec<Note>, labels: Vec<Label>) -> Self {
        let mut note_index = HashMap::with_capacity(notes.len());
        for (position, note) in notes.iter().enumerate() {
            note_index.entry(note.id.clone()).or_insert(position);
        }

        let mut label_index = HashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            label_index.entry(label.id.clone()).or_insert(position);
        }

        Self {
            notes,
            labels,
            note_index,
            label_index,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.note_index.get(id).map(|&i| &self.notes[i])
    }

    pub fn label(&self, id: &str) -> Option<&Label> {
        self.label_index.get(id).map(|&i| &self.labels[i])
    }

    /// Resolve a note's label references, skipping dangling ids
    pub fn labels_of<'a>(&'a self, note: &'a Note) -> impl Iterator<Item = &'a Label> + 'a {
        note.labels.iter().filter_map(move |id| self.label(id))
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let graph = EntityGraph::new(
            vec![Note::text("a", "A", ""), Note::text("b", "B", "")],
            vec![Label::new("l1", "Work")],
        );

        assert_eq!(graph.note("b").unwrap().title, "B");
        assert!(graph.note("c").is_none());
        assert_eq!(graph.label("l1").unwrap().name, "Work");
        assert_eq!(graph.note_count(), 2);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let graph = EntityGraph::new(
            vec![Note::text("a", "first", ""), Note::text("a", "second", "")],
            vec![],
        );
        assert_eq!(graph.note("a").unwrap().title, "first");
    }

    #[test]
    fn test_labels_of_skips_dangling_references() {
        let note = Note::text("a", "", "").with_label("l1").with_label("gone");
        let graph = EntityGraph::new(vec![note.clone()], vec![Label::new("l1", "Work")]);

        let names: Vec<&str> = graph.labels_of(&note).map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Work"]);
    }

    #[test]
    fn test_default_graph_is_empty() {
        assert!(EntityGraph::default().is_empty());
    }
}
