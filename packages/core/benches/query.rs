//! Performance benchmarks for wlater query paths
//!
//! Run with: `cargo bench -p wlater-core`
//!
//! - Listing and filtered search over a 5000-note graph
//! - Device id derivation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wlater_core::device_id;
use wlater_core::models::{Color, EntityGraph, Label, ListItem, Note};
use wlater_core::query::{NoteQueryEngine, SearchQuery};

/// Generate a graph with `count` notes, every fifth one a List
fn generate_graph(count: usize) -> EntityGraph {
    let labels: Vec<Label> = (0..20)
        .map(|i| Label::new(format!("tag.{}", i), format!("Label {}", i)))
        .collect();

    let notes = (0..count)
        .map(|i| {
            let note = if i % 5 == 0 {
                let items = (0..10)
                    .map(|j| ListItem::new(format!("{}-{}", i, j), format!("item {}", j), j % 2 == 0, j as i64))
                    .collect();
                Note::list(format!("l{}", i), format!("List {}", i), items)
            } else {
                Note::text(
                    format!("n{}", i),
                    format!("Note {}", i),
                    format!("Body of note {} mentioning budget {}", i, i % 7),
                )
            };
            note.with_color(Color::ALL[i % Color::ALL.len()])
                .with_label(format!("tag.{}", i % 20))
        })
        .collect();

    EntityGraph::new(notes, labels)
}

fn bench_listing(c: &mut Criterion) {
    let graph = generate_graph(5000);
    let engine = NoteQueryEngine::new(&graph);

    c.bench_function("list_notes_5000", |b| {
        b.iter(|| black_box(engine.list_notes(black_box(1000))))
    });

    c.bench_function("list_labels", |b| b.iter(|| black_box(engine.list_labels())));
}

fn bench_search(c: &mut Criterion) {
    let graph = generate_graph(5000);
    let engine = NoteQueryEngine::new(&graph);

    let text_only = SearchQuery::new().with_text("budget 3");
    c.bench_function("search_text_5000", |b| {
        b.iter(|| black_box(engine.search_notes(black_box(&text_only))))
    });

    let filtered = SearchQuery::new()
        .with_text("budget")
        .with_colors([Color::Red, Color::Blue])
        .with_labels(["Label 3", "Label 7"])
        .with_trashed(false)
        .with_limit(50);
    c.bench_function("search_filtered_5000", |b| {
        b.iter(|| black_box(engine.search_notes(black_box(&filtered))))
    });
}

fn bench_device_id(c: &mut Criterion) {
    c.bench_function("derive_device_id", |b| {
        b.iter(|| device_id::derive(black_box("JohnDoe123"), black_box("Linux")))
    });
}

criterion_group!(benches, bench_listing, bench_search, bench_device_id);
criterion_main!(benches);
