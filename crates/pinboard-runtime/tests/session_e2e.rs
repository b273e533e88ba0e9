//! End-to-end tests driving a [`CanvasSession`] with synthetic pointer
//! streams against a real [`BoardStore`].

use pinboard_core::{
    BoardId, BoardStore, Event, NoteId, Point, PointerButton, PointerEvent,
};
use pinboard_runtime::{
    CanvasSession, Duration, Instant, LoopTransition, ReorderCommit, SessionEffect,
};

struct Harness {
    session: CanvasSession,
    store: BoardStore,
    board: BoardId,
    t0: Instant,
}

impl Harness {
    /// One board with four notes in section 0 and one in section 1.
    fn new(edit_mode: bool) -> Self {
        let mut store = BoardStore::with_seed(42);
        let board = store.create_board();
        for _ in 0..3 {
            store.add_note(board, 0).unwrap();
        }
        store.add_section(board).unwrap();
        store.set_edit_mode(board, edit_mode).unwrap();
        let mut session = CanvasSession::default();
        session.set_viewport(1000.0, 900.0);
        let t0 = Instant::now();
        session.tick(t0, &store);
        Self {
            session,
            store,
            board,
            t0,
        }
    }

    fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    fn send(&mut self, event: PointerEvent, ms: u64) -> Vec<SessionEffect> {
        let now = self.at(ms);
        self.session
            .handle_event(&Event::Pointer(event), now, &mut self.store)
            .unwrap()
    }

    fn order(&self, section: usize) -> Vec<NoteId> {
        self.store.board(self.board).unwrap().sections()[section]
            .notes()
            .iter()
            .map(|n| n.id)
            .collect()
    }

    fn center(&self, note: NoteId) -> Point {
        self.session.layout().note_rect(note).unwrap().center()
    }
}

#[test]
fn drag_forward_within_section_commits_shifted_index() {
    let mut h = Harness::new(true);
    let before = h.order(0);
    assert_eq!(before.len(), 4);

    let start = h.center(before[0]);
    let effects = h.send(PointerEvent::down(PointerButton::Primary, start.x, start.y), 0);
    assert!(effects.contains(&SessionEffect::DragArmed(before[0])));

    // Arm, then hover the right half of the third note.
    let third = h.center(before[2]);
    let effects = h.send(PointerEvent::moved(third.x + 30.0, third.y), 250);
    assert!(effects.contains(&SessionEffect::DragStarted(before[0])));

    let frame = h.session.tick(h.at(260), &h.store).frame;
    let ghost = frame.note_markers().last().unwrap();
    assert_eq!(ghost.0, before[0]);
    assert!(ghost.2);

    let effects = h.send(PointerEvent::up(PointerButton::Primary, third.x + 30.0, third.y), 300);
    assert!(effects.contains(&SessionEffect::Reordered(ReorderCommit {
        note: before[0],
        from_section: 0,
        from_index: 0,
        to_section: 0,
        to_index: 2,
    })));
    assert_eq!(h.order(0), vec![before[1], before[2], before[0], before[3]]);
}

#[test]
fn early_release_is_a_click_and_moves_nothing() {
    let mut h = Harness::new(true);
    let before = h.order(0);
    let p = h.center(before[1]);
    h.send(PointerEvent::down(PointerButton::Primary, p.x, p.y), 0);
    h.send(PointerEvent::moved(p.x + 400.0, p.y), 100);
    let effects = h.send(PointerEvent::up(PointerButton::Primary, p.x + 400.0, p.y), 150);
    assert!(effects.contains(&SessionEffect::NoteClicked {
        note: before[1],
        section: 0,
        index: 1,
    }));
    assert!(!effects.iter().any(|e| matches!(e, SessionEffect::Reordered(_))));
    assert_eq!(h.order(0), before);
}

#[test]
fn cross_section_move_of_only_note_leaves_empty_section() {
    let mut h = Harness::new(true);
    let only = h.order(1)[0];
    let p = h.center(only);
    h.send(PointerEvent::down(PointerButton::Primary, p.x, p.y), 0);
    h.send(PointerEvent::moved(p.x, p.y), 220);

    let target = h.center(h.order(0)[0]);
    h.send(PointerEvent::moved(target.x - 40.0, target.y), 240);
    h.send(PointerEvent::up(PointerButton::Primary, target.x - 40.0, target.y), 260);

    assert!(h.order(1).is_empty());
    assert_eq!(h.order(0)[0], only);

    h.session.tick(h.at(280), &h.store);
    let layout = h.session.layout();
    let grid = layout.grid(1).expect("emptied section still laid out");
    assert!(grid.items.is_empty());
    assert_eq!(grid.add_note.x, layout.geometry.content_x);
}

#[test]
fn pointer_cancel_abandons_drag() {
    let mut h = Harness::new(true);
    let before = h.order(0);
    let p = h.center(before[0]);
    h.send(PointerEvent::down(PointerButton::Primary, p.x, p.y), 0);
    h.send(PointerEvent::moved(p.x + 500.0, p.y), 300);
    let effects = h.send(
        PointerEvent::new(pinboard_core::PointerEventKind::Cancel, p.x, p.y),
        310,
    );
    assert!(effects.contains(&SessionEffect::DragCancelled));
    assert!(h.session.drag().is_idle());
    assert_eq!(h.order(0), before);
}

#[test]
fn clicks_on_add_controls_mutate_the_store() {
    let mut h = Harness::new(false);
    let add_note = h.session.layout().grid(1).unwrap().add_note.center();
    h.send(PointerEvent::down(PointerButton::Primary, add_note.x, add_note.y), 0);
    let effects = h.send(PointerEvent::up(PointerButton::Primary, add_note.x, add_note.y), 10);
    assert!(matches!(
        effects.as_slice(),
        [SessionEffect::NoteAdded { section: 1, .. }]
    ));
    assert_eq!(h.order(1).len(), 2);

    h.session.tick(h.at(20), &h.store);
    let add_row = h.session.layout().add_row.unwrap().center();
    h.send(PointerEvent::down(PointerButton::Primary, add_row.x, add_row.y), 30);
    let effects = h.send(PointerEvent::up(PointerButton::Primary, add_row.x, add_row.y), 40);
    assert!(matches!(effects.as_slice(), [SessionEffect::SectionAdded(_)]));
    assert_eq!(h.store.board(h.board).unwrap().sections().len(), 3);
}

#[test]
fn press_and_release_on_different_controls_does_nothing() {
    let mut h = Harness::new(false);
    let add_note = h.session.layout().grid(1).unwrap().add_note.center();
    let add_row = h.session.layout().add_row.unwrap().center();
    h.send(PointerEvent::down(PointerButton::Primary, add_note.x, add_note.y), 0);
    let effects = h.send(PointerEvent::up(PointerButton::Primary, add_row.x, add_row.y), 10);
    assert!(effects.is_empty());
    assert_eq!(h.store.board(h.board).unwrap().sections().len(), 2);
}

#[test]
fn frame_loop_follows_edit_mode_and_hover() {
    let mut h = Harness::new(false);
    assert!(!h.session.frame_loop().is_running());

    let p = h.center(h.order(0)[0]);
    let effects = h.send(PointerEvent::moved(p.x, p.y), 0);
    assert!(effects.contains(&SessionEffect::FrameLoop(LoopTransition::Started)));

    let effects = h.send(PointerEvent::new(pinboard_core::PointerEventKind::Leave, 0.0, 0.0), 5);
    assert!(effects.contains(&SessionEffect::FrameLoop(LoopTransition::Stopped)));

    h.store.set_edit_mode(h.board, true).unwrap();
    assert_eq!(
        h.session.sync(&h.store),
        vec![SessionEffect::FrameLoop(LoopTransition::Started)]
    );
    let first = h.session.tick(h.at(10), &h.store);
    assert_eq!(first.loop_transition, LoopTransition::Unchanged);
    assert!(h.session.frame_loop().ants_offset() > 0.0);
}

#[test]
fn tiles_glide_after_reorder() {
    let mut h = Harness::new(true);
    let before = h.order(0);
    let moved = before[1];
    let old = h.session.layout().note_rect(moved).unwrap().origin();

    // Move the first note to the end; the others shift left.
    let p = h.center(before[0]);
    h.send(PointerEvent::down(PointerButton::Primary, p.x, p.y), 0);
    let last = h.center(before[3]);
    h.send(PointerEvent::moved(last.x + 40.0, last.y), 220);
    h.send(PointerEvent::up(PointerButton::Primary, last.x + 40.0, last.y), 240);
    assert_eq!(h.order(0)[3], before[0]);

    h.session.tick(h.at(250), &h.store);
    let target = h.session.layout().note_rect(moved).unwrap().origin();
    let now_at = h.session.animator().get(moved).unwrap();
    assert!(now_at.distance(target) < old.distance(target));
    assert!(now_at.distance(target) > 0.0);

    for frame in 0..100 {
        h.session.tick(h.at(260 + frame * 16), &h.store);
        if h.session.animator().is_settled() {
            break;
        }
    }
    assert_eq!(h.session.animator().get(moved), Some(target));
}

#[test]
fn dragged_note_is_untracked_until_release() {
    let mut h = Harness::new(true);
    let before = h.order(0);
    let dragged = before[0];
    assert!(h.session.animator().get(dragged).is_some());

    let p = h.center(dragged);
    h.send(PointerEvent::down(PointerButton::Primary, p.x, p.y), 0);
    h.send(PointerEvent::moved(p.x + 30.0, p.y + 30.0), 250);
    h.session.tick(h.at(260), &h.store);
    assert!(h.session.drag().active().is_some());
    assert_eq!(h.session.animator().get(dragged), None);

    let last = h.center(before[3]);
    h.send(PointerEvent::moved(last.x + 40.0, last.y), 270);
    h.send(PointerEvent::up(PointerButton::Primary, last.x + 40.0, last.y), 280);
    h.session.tick(h.at(290), &h.store);
    let target = h.session.layout().note_rect(dragged).unwrap().origin();
    assert_eq!(h.session.animator().get(dragged), Some(target));
}

#[test]
fn secondary_press_during_drag_is_ignored() {
    let mut h = Harness::new(true);
    let note = h.order(0)[0];
    let p = h.center(note);
    h.send(PointerEvent::down(PointerButton::Primary, p.x, p.y), 0);
    h.session.tick(h.at(220), &h.store);
    assert!(h.session.drag().active().is_some());

    let add = h.session.layout().grid(0).unwrap().add_note.center();
    let effects = h.send(PointerEvent::down(PointerButton::Secondary, add.x, add.y), 230);
    assert!(
        !effects
            .iter()
            .any(|e| matches!(e, SessionEffect::ContextMenu(_))),
        "{effects:?}"
    );
    assert!(h.session.drag().active().is_some());
}
