#![forbid(unsafe_code)]

//! Drag-to-reorder state machine.
//!
//! [`DragController`] turns pointer input over note tiles into reorder
//! commits. Time is injected: every operation takes `now`, and the arming
//! deadline is only ever compared against it.
//!
//! # State Machine
//!
//! ```text
//!          down on note (edit mode)        deadline reached
//!   Idle ───────────────────────────▶ Pending ─────────────────▶ Active
//!    ▲                                   │                          │
//!    │           up (click)              │        up (commit)       │
//!    └───────────────────────────────────┴──────────────────────────┘
//!                        cancel from any state
//! ```
//!
//! # Invariants
//!
//! 1. A press produces either a click or a drag, never both.
//! 2. Sections are captured by [`SectionId`] and resolved to indices only
//!    when they are used, so edits made mid-drag never misroute a commit.
//! 3. Hover slots are computed against the model ordering (the dragged note
//!    still in place). The index shift caused by removing it is applied
//!    exactly once, in [`landing_index`].
//! 4. Releasing an active drag always returns to `Idle`, committed or not.
//!
//! # Failure Modes
//!
//! - If the dragged note or the hovered section disappeared before release,
//!   the drag cancels silently.
//! - A pointer-down while a press is already pending or active is ignored.

use pinboard_core::geometry::Point;
use pinboard_core::model::{Board, Note, NoteId, SectionId};
use pinboard_layout::HitTarget;
use web_time::{Duration, Instant};

/// Final position of a dragged note once it is removed from its source.
///
/// `to_index` is an insertion slot computed against the ordering that still
/// contains the note; within one section, slots after the source shift down
/// by one.
#[inline]
#[must_use]
pub fn landing_index(
    from_section: usize,
    from_index: usize,
    to_section: usize,
    to_index: usize,
) -> usize {
    if from_section == to_section && to_index > from_index {
        to_index - 1
    } else {
        to_index
    }
}

// ---------------------------------------------------------------------------
// Public state views
// ---------------------------------------------------------------------------

/// Coarse controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pending,
    Active,
}

/// Where a drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSource {
    pub note: Note,
    pub section_id: SectionId,
    /// Section index at press time.
    pub section: usize,
    /// Note index at press time.
    pub index: usize,
    /// Pointer position relative to the tile's top-left corner.
    pub grab_offset: Point,
}

/// Insertion slot under the pointer, in model ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverSlot {
    pub section_id: SectionId,
    pub index: usize,
}

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub source: DragSource,
    pub pointer: Point,
    pub hover: HoverSlot,
}

impl ActiveDrag {
    /// Top-left corner of the tile following the pointer.
    #[inline]
    #[must_use]
    pub fn ghost_origin(&self) -> Point {
        self.pointer - self.source.grab_offset
    }
}

/// A resolved move, ready for the committer. `to_index` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderCommit {
    pub note: NoteId,
    pub from_section: usize,
    pub from_index: usize,
    pub to_section: usize,
    pub to_index: usize,
}

impl ReorderCommit {
    /// Whether applying the commit leaves the board unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from_section == self.to_section && self.from_index == self.to_index
    }
}

/// Result of feeding one input to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing observable changed.
    None,
    /// A press on a note armed the timer.
    Armed(NoteId),
    /// The timer fired; the note is now being dragged.
    Started(NoteId),
    /// The pointer moved during an active drag.
    Moved,
    /// A press was released before the timer fired.
    Click {
        note: NoteId,
        section: usize,
        index: usize,
    },
    /// An active drag was released over a valid slot.
    Commit(ReorderCommit),
    /// The press or drag ended without a move.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    Pending {
        source: DragSource,
        pointer: Point,
        deadline: Instant,
    },
    Active(ActiveDrag),
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Press/arm/drag/commit state machine for note tiles.
#[derive(Debug, Clone)]
pub struct DragController {
    arming_delay: Duration,
    state: State,
}

impl DragController {
    #[must_use]
    pub fn new(arming_delay: Duration) -> Self {
        Self {
            arming_delay,
            state: State::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self.state {
            State::Idle => DragPhase::Idle,
            State::Pending { .. } => DragPhase::Pending,
            State::Active(_) => DragPhase::Active,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// The active drag, if the timer has fired.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            State::Active(drag) => Some(drag),
            _ => None,
        }
    }

    /// The source of a pending or active drag.
    #[must_use]
    pub fn source(&self) -> Option<&DragSource> {
        match &self.state {
            State::Idle => None,
            State::Pending { source, .. } => Some(source),
            State::Active(drag) => Some(&drag.source),
        }
    }

    /// When a pending press becomes a drag.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::Pending { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Handle a primary pointer-down.
    ///
    /// Arms the timer when `target` is a note and drag editing is enabled.
    pub fn on_pointer_down(
        &mut self,
        target: Option<&HitTarget>,
        board: &Board,
        edit_mode: bool,
        pointer: Point,
        now: Instant,
    ) -> DragOutcome {
        if !self.is_idle() || !edit_mode {
            return DragOutcome::None;
        }
        let Some(&HitTarget::Note {
            section,
            index,
            note,
            rect,
        }) = target
        else {
            return DragOutcome::None;
        };
        let Some(section_id) = board.section(section).map(|s| s.id()) else {
            return DragOutcome::None;
        };

        let source = DragSource {
            note,
            section_id,
            section,
            index,
            grab_offset: pointer - rect.origin(),
        };
        self.state = State::Pending {
            source,
            pointer,
            deadline: now + self.arming_delay,
        };
        tracing::debug!(note = %note.id, section, index, "drag armed");
        DragOutcome::Armed(note.id)
    }

    /// Promote a pending press whose deadline has passed.
    pub fn poll(&mut self, now: Instant) -> DragOutcome {
        let State::Pending {
            source,
            pointer,
            deadline,
        } = self.state
        else {
            return DragOutcome::None;
        };
        if now < deadline {
            return DragOutcome::None;
        }
        self.state = State::Active(ActiveDrag {
            source,
            pointer,
            hover: HoverSlot {
                section_id: source.section_id,
                index: source.index,
            },
        });
        tracing::debug!(note = %source.note.id, "drag started");
        DragOutcome::Started(source.note.id)
    }

    /// Handle a pointer move. `target` must come from the model layout.
    pub fn on_pointer_move(
        &mut self,
        pointer: Point,
        target: Option<&HitTarget>,
        board: &Board,
        now: Instant,
    ) -> DragOutcome {
        let promoted = self.poll(now);
        match &mut self.state {
            State::Idle => DragOutcome::None,
            State::Pending { pointer: p, .. } => {
                *p = pointer;
                DragOutcome::None
            }
            State::Active(drag) => {
                drag.pointer = pointer;
                if let Some(slot) = hover_slot(target, board, drag, pointer) {
                    drag.hover = slot;
                }
                match promoted {
                    DragOutcome::None => DragOutcome::Moved,
                    started => started,
                }
            }
        }
    }

    /// Handle a primary pointer-up.
    pub fn on_pointer_up(&mut self, board: &Board, now: Instant) -> DragOutcome {
        // A release after the deadline with no intervening poll still drags.
        self.poll(now);
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => DragOutcome::None,
            State::Pending { source, .. } => {
                tracing::debug!(note = %source.note.id, "press released before arming");
                DragOutcome::Click {
                    note: source.note.id,
                    section: source.section,
                    index: source.index,
                }
            }
            State::Active(drag) => match resolve(board, &drag) {
                Some(commit) => {
                    tracing::debug!(
                        note = %commit.note,
                        from_section = commit.from_section,
                        from_index = commit.from_index,
                        to_section = commit.to_section,
                        to_index = commit.to_index,
                        "drag committed"
                    );
                    DragOutcome::Commit(commit)
                }
                None => {
                    tracing::debug!(note = %drag.source.note.id, "drag target vanished, cancelled");
                    DragOutcome::Cancelled
                }
            },
        }
    }

    /// Abandon any press or drag without committing.
    pub fn cancel(&mut self) -> DragOutcome {
        if self.is_idle() {
            return DragOutcome::None;
        }
        self.state = State::Idle;
        tracing::debug!("drag cancelled");
        DragOutcome::Cancelled
    }
}

/// Insertion slot for the hit target under the pointer, or `None` to keep
/// the previous one.
fn hover_slot(
    target: Option<&HitTarget>,
    board: &Board,
    drag: &ActiveDrag,
    pointer: Point,
) -> Option<HoverSlot> {
    let section_of = |index: usize| board.section(index);
    match *target? {
        HitTarget::Note {
            section,
            index,
            note,
            rect,
        } => {
            if note.id == drag.source.note.id {
                let (s, i) = board.locate_note(note.id)?;
                return Some(HoverSlot {
                    section_id: section_of(s)?.id(),
                    index: i,
                });
            }
            let after = usize::from(pointer.x > rect.center().x);
            Some(HoverSlot {
                section_id: section_of(section)?.id(),
                index: index + after,
            })
        }
        HitTarget::AddNote { section, .. } | HitTarget::SectionBackground { section } => {
            let sec = section_of(section)?;
            Some(HoverSlot {
                section_id: sec.id(),
                index: sec.len(),
            })
        }
        HitTarget::Separator { .. } | HitTarget::AddRow { .. } => None,
    }
}

/// Resolve captured ids against the current board.
fn resolve(board: &Board, drag: &ActiveDrag) -> Option<ReorderCommit> {
    let (from_section, from_index) = board.locate_note(drag.source.note.id)?;
    let to_section = board.section_index(drag.hover.section_id)?;
    Some(ReorderCommit {
        note: drag.source.note.id,
        from_section,
        from_index,
        to_section,
        to_index: landing_index(from_section, from_index, to_section, drag.hover.index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_core::model::{BoardId, Section, Tone};
    use pinboard_layout::{LayoutMetrics, compute_layout, hit_test};

    fn board() -> Board {
        let notes = |ids: &[u64]| ids.iter().map(|&i| Note::new(NoteId(i), Tone::Rose)).collect();
        Board::new(
            BoardId(1),
            "Drag",
            vec![
                Section::new(SectionId(10), notes(&[1, 2, 3, 4])),
                Section::new(SectionId(20), notes(&[5])),
            ],
        )
    }

    fn target_at(board: &Board, p: Point) -> Option<HitTarget> {
        hit_test(&compute_layout(Some(board), 1000.0, &LayoutMetrics::default()), p)
    }

    fn center_of(board: &Board, id: NoteId) -> Point {
        compute_layout(Some(board), 1000.0, &LayoutMetrics::default())
            .note_rect(id)
            .map(|r| r.center())
            .unwrap()
    }

    fn delay() -> Duration {
        Duration::from_millis(200)
    }

    fn press(ctl: &mut DragController, board: &Board, id: NoteId, t: Instant) -> Point {
        let p = center_of(board, id);
        let hit = target_at(board, p);
        assert_eq!(
            ctl.on_pointer_down(hit.as_ref(), board, true, p, t),
            DragOutcome::Armed(id)
        );
        p
    }

    #[test]
    fn landing_index_shifts_forward_moves_only() {
        assert_eq!(landing_index(0, 0, 0, 3), 2);
        assert_eq!(landing_index(0, 3, 0, 1), 1);
        assert_eq!(landing_index(0, 1, 0, 1), 1);
        assert_eq!(landing_index(0, 0, 1, 3), 3);
    }

    #[test]
    fn press_requires_edit_mode_and_a_note() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        let p = center_of(&b, NoteId(1));
        let hit = target_at(&b, p);
        assert_eq!(
            ctl.on_pointer_down(hit.as_ref(), &b, false, p, t),
            DragOutcome::None
        );
        let add = HitTarget::AddRow {
            rect: pinboard_core::Rect::new(0.0, 0.0, 1.0, 1.0),
        };
        assert_eq!(
            ctl.on_pointer_down(Some(&add), &b, true, p, t),
            DragOutcome::None
        );
        assert_eq!(ctl.phase(), DragPhase::Idle);
    }

    #[test]
    fn early_release_is_a_click() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(2), t);
        assert_eq!(ctl.phase(), DragPhase::Pending);
        let out = ctl.on_pointer_up(&b, t + Duration::from_millis(50));
        assert_eq!(
            out,
            DragOutcome::Click {
                note: NoteId(2),
                section: 0,
                index: 1
            }
        );
        assert!(ctl.is_idle());
    }

    #[test]
    fn deadline_promotes_to_active() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        assert_eq!(ctl.poll(t + Duration::from_millis(199)), DragOutcome::None);
        assert_eq!(ctl.poll(t + delay()), DragOutcome::Started(NoteId(1)));
        let active = ctl.active().unwrap();
        assert_eq!(active.hover.index, 0);
        assert_eq!(active.hover.section_id, SectionId(10));
    }

    #[test]
    fn second_press_is_ignored() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        let p = center_of(&b, NoteId(3));
        let hit = target_at(&b, p);
        assert_eq!(
            ctl.on_pointer_down(hit.as_ref(), &b, true, p, t),
            DragOutcome::None
        );
        assert_eq!(ctl.source().map(|s| s.note.id), Some(NoteId(1)));
    }

    #[test]
    fn press_during_active_drag_is_ignored() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        ctl.poll(t + delay());
        let c = center_of(&b, NoteId(5));
        ctl.on_pointer_move(c, target_at(&b, c).as_ref(), &b, t + delay());
        let before = *ctl.active().unwrap();

        let p = center_of(&b, NoteId(3));
        let hit = target_at(&b, p);
        assert_eq!(
            ctl.on_pointer_down(hit.as_ref(), &b, true, p, t + delay()),
            DragOutcome::None
        );
        assert_eq!(ctl.phase(), DragPhase::Active);
        let after = ctl.active().unwrap();
        assert_eq!(after.source, before.source);
        assert_eq!(after.hover, before.hover);

        assert_eq!(
            ctl.on_pointer_up(&b, t + delay()),
            DragOutcome::Commit(ReorderCommit {
                note: NoteId(1),
                from_section: 0,
                from_index: 0,
                to_section: 1,
                to_index: 0,
            })
        );
    }

    #[test]
    fn forward_drag_commits_with_shift() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        let later = t + delay();

        // Right half of note 3 (index 2) -> slot 3 in model ordering.
        let c = center_of(&b, NoteId(3));
        let p = Point::new(c.x + 20.0, c.y);
        let out = ctl.on_pointer_move(p, target_at(&b, p).as_ref(), &b, later);
        assert_eq!(out, DragOutcome::Started(NoteId(1)));
        assert_eq!(ctl.active().unwrap().hover.index, 3);

        let out = ctl.on_pointer_up(&b, later);
        assert_eq!(
            out,
            DragOutcome::Commit(ReorderCommit {
                note: NoteId(1),
                from_section: 0,
                from_index: 0,
                to_section: 0,
                to_index: 2,
            })
        );
        assert!(ctl.is_idle());
    }

    #[test]
    fn left_half_inserts_before() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(4), t);
        ctl.poll(t + delay());
        let c = center_of(&b, NoteId(2));
        let p = Point::new(c.x - 20.0, c.y);
        ctl.on_pointer_move(p, target_at(&b, p).as_ref(), &b, t + delay());
        match ctl.on_pointer_up(&b, t + delay()) {
            DragOutcome::Commit(commit) => {
                assert_eq!((commit.from_index, commit.to_index), (3, 1));
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn add_note_slot_targets_section_end() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(2), t);
        ctl.poll(t + delay());
        let layout = compute_layout(Some(&b), 1000.0, &LayoutMetrics::default());
        let add = layout.grid(1).unwrap().add_note.center();
        ctl.on_pointer_move(add, hit_test(&layout, add).as_ref(), &b, t + delay());
        assert_eq!(
            ctl.on_pointer_up(&b, t + delay()),
            DragOutcome::Commit(ReorderCommit {
                note: NoteId(2),
                from_section: 0,
                from_index: 1,
                to_section: 1,
                to_index: 1,
            })
        );
    }

    #[test]
    fn empty_space_keeps_last_hover() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        ctl.poll(t + delay());
        let c = center_of(&b, NoteId(5));
        ctl.on_pointer_move(c, target_at(&b, c).as_ref(), &b, t + delay());
        let before = ctl.active().unwrap().hover;
        let far = Point::new(-500.0, -500.0);
        assert_eq!(
            ctl.on_pointer_move(far, None, &b, t + delay()),
            DragOutcome::Moved
        );
        assert_eq!(ctl.active().unwrap().hover, before);
        assert_eq!(ctl.active().unwrap().pointer, far);
    }

    #[test]
    fn vanished_section_cancels_silently() {
        let mut b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        ctl.poll(t + delay());
        let c = center_of(&b, NoteId(5));
        ctl.on_pointer_move(c, target_at(&b, c).as_ref(), &b, t + delay());
        // Replace the board with one lacking the hovered section.
        b = Board::new(
            BoardId(1),
            "Drag",
            vec![Section::new(
                SectionId(10),
                vec![Note::new(NoteId(1), Tone::Rose)],
            )],
        );
        assert_eq!(ctl.on_pointer_up(&b, t + delay()), DragOutcome::Cancelled);
        assert!(ctl.is_idle());
    }

    #[test]
    #[tracing_test::traced_test]
    fn commit_and_cancel_are_logged() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        press(&mut ctl, &b, NoteId(1), t);
        ctl.on_pointer_up(&b, t + delay());
        assert!(logs_contain("drag started"));
        assert!(logs_contain("drag committed"));

        press(&mut ctl, &b, NoteId(2), t);
        ctl.cancel();
        assert!(logs_contain("drag cancelled"));
    }

    #[test]
    fn cancel_from_any_state() {
        let b = board();
        let t = Instant::now();
        let mut ctl = DragController::new(delay());
        assert_eq!(ctl.cancel(), DragOutcome::None);
        press(&mut ctl, &b, NoteId(1), t);
        assert_eq!(ctl.cancel(), DragOutcome::Cancelled);
        press(&mut ctl, &b, NoteId(1), t);
        ctl.poll(t + delay());
        assert_eq!(ctl.cancel(), DragOutcome::Cancelled);
        assert!(ctl.is_idle());
        assert_eq!(ctl.on_pointer_up(&b, t + delay()), DragOutcome::None);
    }
}
