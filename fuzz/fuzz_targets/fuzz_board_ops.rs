#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pinboard_core::{BoardStore, NoteId};
use pinboard_layout::{LayoutMetrics, compute_layout, hit_test};

#[derive(Debug, Arbitrary)]
enum Op {
    AddSection,
    AddNote(u8),
    Within { section: u8, from: u8, to: u8 },
    Between { from_section: u8, from: u8, to_section: u8, to: u8 },
    DeleteSection(u8),
    Probe { width: u16, x: i16, y: i16 },
}

fn note_ids(store: &BoardStore) -> Vec<NoteId> {
    let mut ids: Vec<NoteId> = store
        .selected_board()
        .map(|b| {
            b.sections()
                .iter()
                .flat_map(|s| s.notes().iter().map(|n| n.id))
                .collect()
        })
        .unwrap_or_default();
    ids.sort();
    ids
}

fuzz_target!(|ops: Vec<Op>| {
    let mut store = BoardStore::with_seed(0xF00D);
    let board = store.create_board();
    let metrics = LayoutMetrics::default();

    for op in ops.into_iter().take(256) {
        let before = note_ids(&store);
        match op {
            Op::AddSection => {
                store.add_section(board).expect("board exists");
            }
            Op::AddNote(s) => {
                store.add_note(board, s as usize).expect("board exists");
            }
            Op::Within { section, from, to } => {
                store
                    .move_within_section(board, section as usize, from as usize, to as usize)
                    .expect("board exists");
                assert_eq!(note_ids(&store), before, "move lost or duplicated a note");
            }
            Op::Between { from_section, from, to_section, to } => {
                store
                    .move_between_sections(
                        board,
                        from_section as usize,
                        from as usize,
                        to_section as usize,
                        to as usize,
                    )
                    .expect("board exists");
                assert_eq!(note_ids(&store), before, "move lost or duplicated a note");
            }
            Op::DeleteSection(s) => {
                store.delete_section(board, s as usize).expect("board exists");
            }
            Op::Probe { width, x, y } => {
                let b = store.board(board).expect("board exists");
                let layout = compute_layout(Some(b), f64::from(width), &metrics);
                let _ = hit_test(&layout, pinboard_core::Point::new(f64::from(x), f64::from(y)));
                assert_eq!(layout.section_count(), b.sections().len());
            }
        }
        let sections = store.board(board).expect("board exists").sections().len();
        assert!(sections >= 1, "last section was deleted");
    }
});
