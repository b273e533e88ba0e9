//! Benchmarks for the board layout engine and hit testing.
//!
//! Run with: cargo bench -p pinboard-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pinboard_core::{Board, BoardId, Note, NoteId, Point, Section, SectionId, Tone};
use pinboard_layout::{LayoutMetrics, compute_layout, hit_test};
use std::hint::black_box;

/// Build a board with `sections` sections of `per_section` notes each.
fn make_board(sections: usize, per_section: usize) -> Board {
    let mut next = 0u64;
    let sections = (0..sections)
        .map(|si| {
            let notes = (0..per_section)
                .map(|_| {
                    next += 1;
                    Note::new(NoteId(next), Tone::ALL[next as usize % Tone::ALL.len()])
                })
                .collect();
            Section::new(SectionId(si as u64), notes)
        })
        .collect();
    Board::new(BoardId(1), "Bench", sections)
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/compute");
    let metrics = LayoutMetrics::default();

    for (sections, per) in [(1, 10), (10, 20), (50, 40)] {
        let board = make_board(sections, per);
        group.bench_with_input(
            BenchmarkId::new("sections_x_notes", format!("{sections}x{per}")),
            &board,
            |b, board| b.iter(|| black_box(compute_layout(Some(board), 1280.0, &metrics))),
        );
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/hit_test");
    let metrics = LayoutMetrics::default();
    let board = make_board(50, 40);
    let layout = compute_layout(Some(&board), 1280.0, &metrics);
    let last = layout
        .notes()
        .last()
        .map(|p| p.rect.center())
        .unwrap_or(Point::ORIGIN);

    group.bench_function("last_note", |b| {
        b.iter(|| black_box(hit_test(&layout, black_box(last))))
    });
    group.bench_function("miss", |b| {
        b.iter(|| black_box(hit_test(&layout, black_box(Point::new(-1.0, -1.0)))))
    });
    group.finish();
}

criterion_group!(benches, bench_compute_layout, bench_hit_test);
criterion_main!(benches);
