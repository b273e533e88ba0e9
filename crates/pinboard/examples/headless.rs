//! Scripted, headless walk through a drag-to-reorder.
//!
//! Run with: `PINBOARD_LOG=debug cargo run -p pinboard --example headless`

use pinboard::prelude::*;
use pinboard::runtime::Duration;

fn main() -> Result<()> {
    pinboard::logging::init();

    let mut store = BoardStore::new();
    let board = store.create_board();
    store.commit_create_name(board, "  Roadmap ")?;
    for _ in 0..4 {
        store.add_note(board, 0)?;
    }
    store.add_section(board)?;
    store.set_edit_mode(board, true)?;

    let mut session = CanvasSession::default();
    session.set_viewport(1200.0, 800.0);
    let t0 = Instant::now();
    session.tick(t0, &store);

    let notes: Vec<Point> = session.layout().notes().map(|p| p.rect.center()).collect();
    let (Some(&from), Some(&to)) = (notes.first(), notes.get(3)) else {
        return Ok(());
    };

    let script = [
        (0, PointerEvent::down(PointerButton::Primary, from.x, from.y)),
        (250, PointerEvent::moved(to.x + 40.0, to.y)),
        (300, PointerEvent::up(PointerButton::Primary, to.x + 40.0, to.y)),
    ];
    for (ms, event) in script {
        let now = t0 + Duration::from_millis(ms);
        for effect in session.handle_event(&Event::Pointer(event), now, &mut store)? {
            tracing::info!(?effect, "session effect");
        }
    }

    let mut frames = 0u64;
    loop {
        frames += 1;
        let out = session.tick(t0 + Duration::from_millis(300 + frames * 16), &store);
        if session.animator().is_settled() || frames > 120 {
            tracing::info!(frames, commands = out.frame.len(), "animation settled");
            break;
        }
    }

    if let Some(b) = store.board(board) {
        for (i, section) in b.sections().iter().enumerate() {
            let ids: Vec<String> = section.notes().iter().map(|n| n.id.to_string()).collect();
            println!("{} / section {i}: {}", b.name(), ids.join(", "));
        }
    }
    Ok(())
}
