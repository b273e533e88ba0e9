#![no_main]

use libfuzzer_sys::fuzz_target;
use pinboard_core::{BoardStore, Event, PointerButton, PointerEvent, PointerEventKind};
use pinboard_runtime::{CanvasSession, Duration, Instant};

fuzz_target!(|data: &[u8]| {
    // Byte 0 selects edit mode, then 6-byte records: kind, dt, x, y.
    if data.is_empty() {
        return;
    }
    let mut store = BoardStore::with_seed(7);
    let board = store.create_board();
    for _ in 0..5 {
        let _ = store.add_note(board, 0);
    }
    let _ = store.add_section(board);
    let _ = store.set_edit_mode(board, data[0] & 1 == 1);
    let total_before = store.board(board).map(|b| b.note_count()).unwrap_or(0);

    let mut session = CanvasSession::default();
    session.set_viewport(900.0, 700.0);
    let mut now = Instant::now();

    for rec in data[1..].chunks_exact(6) {
        now += Duration::from_millis(u64::from(rec[1]) * 4);
        let x = f64::from(i16::from_le_bytes([rec[2], rec[3]]));
        let y = f64::from(i16::from_le_bytes([rec[4], rec[5]]));
        let kind = match rec[0] % 7 {
            0 => PointerEventKind::Down(PointerButton::Primary),
            1 => PointerEventKind::Up(PointerButton::Primary),
            2 => PointerEventKind::Down(PointerButton::Secondary),
            3 => PointerEventKind::Leave,
            4 => PointerEventKind::Cancel,
            _ => PointerEventKind::Move,
        };
        let event = Event::Pointer(PointerEvent::new(kind, x, y));
        session
            .handle_event(&event, now, &mut store)
            .expect("selected board exists");
        let out = session.tick(now, &store);
        assert!(out.frame.note_markers().filter(|(_, _, ghost)| *ghost).count() <= 1);
    }

    // Clicks on add controls may add notes; drags never remove any.
    let total_after = store.board(board).map(|b| b.note_count()).unwrap_or(0);
    assert!(total_after >= total_before);
});
