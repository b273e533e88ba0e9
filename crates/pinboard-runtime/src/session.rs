#![forbid(unsafe_code)]

//! Canvas session: the single entry point a host drives.
//!
//! A [`CanvasSession`] owns every piece of transient canvas state (cached
//! layout, drag controller, animator, frame loop, hover) and nothing else.
//! The board model stays in the caller's [`BoardStore`]; the session reads
//! it on every call and mutates it only through store operations.
//!
//! # Host contract
//!
//! - Feed every input through [`CanvasSession::handle_event`].
//! - While the loop is running (see [`SessionEffect::FrameLoop`]), call
//!   [`CanvasSession::tick`] once per display frame and paint the returned
//!   [`Frame`]. Otherwise call it after any event that returned effects.
//!
//! # Invariants
//!
//! 1. The layout used for hit testing is recomputed before every hit test
//!    whenever the board, its revision, or the viewport width changed.
//! 2. Hit tests always run against the model layout, never the drag
//!    projection, so slot indices refer to model ordering.
//! 3. Switching boards, leaving edit mode, losing focus, or a pointer cancel
//!    abandons any drag without touching the model.

use pinboard_core::error::StoreError;
use pinboard_core::event::{Event, PointerButton, PointerEvent, PointerEventKind};
use pinboard_core::geometry::{Point, Rect};
use pinboard_core::model::{Board, BoardId, NoteId, SectionId};
use pinboard_core::store::BoardStore;
use pinboard_layout::{BoardLayout, HitTarget, compute_layout, compute_slot_layout, hit_test};
use pinboard_render::{DragGhost, Frame, RenderInput, RenderStyle, Viewport, render};
use web_time::Instant;

use crate::animator::{PositionAnimator, layout_targets};
use crate::config::CanvasConfig;
use crate::drag::{DragController, DragOutcome, ReorderCommit};
use crate::frame_loop::{FrameLoop, LoopDemand, LoopTransition};
use crate::projection::project;

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// What was under the pointer when a context menu was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuKind {
    /// Empty space in a section's grid.
    Section,
    /// A section's add-note control.
    AddNote,
    /// The separator above a section.
    Separator,
}

/// Request for the host to open a context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuRequest {
    pub position: Point,
    pub section: usize,
    pub kind: ContextMenuKind,
}

/// Something the host may need to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    NoteAdded { section: usize, note: NoteId },
    SectionAdded(SectionId),
    NoteClicked {
        note: NoteId,
        section: usize,
        index: usize,
    },
    DragArmed(NoteId),
    DragStarted(NoteId),
    Reordered(ReorderCommit),
    DragCancelled,
    ContextMenu(ContextMenuRequest),
    /// Start or stop the host's frame callback.
    FrameLoop(LoopTransition),
}

/// Result of one [`CanvasSession::tick`].
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub frame: Frame,
    pub loop_transition: LoopTransition,
    pub effects: Vec<SessionEffect>,
}

// ---------------------------------------------------------------------------
// Layout cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    board: Option<BoardId>,
    revision: u64,
    width_bits: u64,
}

#[derive(Debug, Clone)]
struct LayoutCache {
    key: Option<LayoutKey>,
    layout: BoardLayout,
    recomputed: u64,
}

// ---------------------------------------------------------------------------
// CanvasSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CanvasSession {
    config: CanvasConfig,
    style: RenderStyle,
    viewport: Viewport,
    board: Option<BoardId>,
    cache: LayoutCache,
    drag: DragController,
    animator: PositionAnimator,
    frame_loop: FrameLoop,
    hover: Option<HitTarget>,
    pressed: Option<HitTarget>,
}

impl CanvasSession {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        let layout = compute_layout(None, 0.0, &config.metrics);
        Self {
            style: config.render_style(),
            viewport: Viewport::default(),
            board: None,
            cache: LayoutCache {
                key: None,
                layout,
                recomputed: 0,
            },
            drag: DragController::new(config.interaction.arming_delay()),
            animator: PositionAnimator::new(
                config.animation.smoothing,
                config.animation.snap_epsilon,
            ),
            frame_loop: FrameLoop::new(config.animation.ants_speed),
            hover: None,
            pressed: None,
            config,
        }
    }

    // --- Accessors ---------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Board the session last synchronized with.
    #[must_use]
    pub fn board(&self) -> Option<BoardId> {
        self.board
    }

    /// Model layout from the last refresh.
    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.cache.layout
    }

    /// How many times the layout has been recomputed.
    #[must_use]
    pub fn layout_recomputations(&self) -> u64 {
        self.cache.recomputed
    }

    #[must_use]
    pub fn hover(&self) -> Option<HitTarget> {
        self.hover
    }

    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    #[must_use]
    pub fn animator(&self) -> &PositionAnimator {
        &self.animator
    }

    #[must_use]
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    // --- Viewport ----------------------------------------------------------

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn set_scroll_top(&mut self, top: f64) {
        self.viewport.scroll_top = top;
    }

    // --- Input -------------------------------------------------------------

    /// Process one input event.
    pub fn handle_event(
        &mut self,
        event: &Event,
        now: Instant,
        store: &mut BoardStore,
    ) -> Result<Vec<SessionEffect>, StoreError> {
        let mut effects = Vec::new();
        self.sync_board(store, &mut effects);
        self.poll_drag(now, &mut effects);

        match *event {
            Event::Resize { width, height } => self.set_viewport(width, height),
            Event::Scroll { top } => self.set_scroll_top(top),
            Event::Focus(true) => {}
            Event::Focus(false) => {
                self.pressed = None;
                self.hover = None;
                self.cancel_drag(&mut effects);
            }
            Event::Pointer(pointer) => self.handle_pointer(pointer, now, store, &mut effects)?,
        }

        self.update_loop(store, &mut effects);
        Ok(effects)
    }

    /// Re-read store state outside of an event (e.g. after the host toggled
    /// edit mode or switched boards).
    pub fn sync(&mut self, store: &BoardStore) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        self.sync_board(store, &mut effects);
        self.update_loop(store, &mut effects);
        effects
    }

    fn handle_pointer(
        &mut self,
        event: PointerEvent,
        now: Instant,
        store: &mut BoardStore,
        effects: &mut Vec<SessionEffect>,
    ) -> Result<(), StoreError> {
        let Some(board_id) = self.board else {
            self.hover = None;
            self.pressed = None;
            return Ok(());
        };
        self.refresh_layout(store.board(board_id));
        let hit = hit_test(&self.cache.layout, event.position);
        let edit_mode = store.is_edit_mode(board_id);

        match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => {
                if !self.drag.is_idle() {
                    return Ok(());
                }
                self.pressed = hit;
                if let Some(board) = store.board(board_id)
                    && let DragOutcome::Armed(note) = self.drag.on_pointer_down(
                        hit.as_ref(),
                        board,
                        edit_mode,
                        event.position,
                        now,
                    )
                {
                    effects.push(SessionEffect::DragArmed(note));
                }
            }
            PointerEventKind::Down(PointerButton::Secondary) => {
                if !self.drag.is_idle() {
                    return Ok(());
                }
                if let Some(request) = context_menu(hit, event.position) {
                    tracing::debug!(
                        section = request.section,
                        kind = ?request.kind,
                        "context menu requested"
                    );
                    effects.push(SessionEffect::ContextMenu(request));
                }
            }
            PointerEventKind::Up(PointerButton::Primary) => {
                let pressed = self.pressed.take();
                if !self.drag.is_idle() {
                    let outcome = match store.board(board_id) {
                        Some(board) => self.drag.on_pointer_up(board, now),
                        None => self.drag.cancel(),
                    };
                    return apply_drag_outcome(outcome, board_id, store, effects);
                }
                if let (Some(pressed), Some(hit)) = (pressed, hit)
                    && pressed.same_control(&hit)
                {
                    activate(hit, board_id, store, effects)?;
                }
            }
            PointerEventKind::Down(_) | PointerEventKind::Up(_) => {}
            PointerEventKind::Move => {
                self.hover = hit;
                if self.drag.is_idle() {
                    return Ok(());
                }
                if let Some(board) = store.board(board_id)
                    && let DragOutcome::Started(note) =
                        self.drag.on_pointer_move(event.position, hit.as_ref(), board, now)
                {
                    effects.push(SessionEffect::DragStarted(note));
                }
            }
            PointerEventKind::Leave => self.hover = None,
            PointerEventKind::Cancel => {
                self.pressed = None;
                self.cancel_drag(effects);
            }
        }
        Ok(())
    }

    // --- Frames ------------------------------------------------------------

    /// Advance one frame and render it.
    pub fn tick(&mut self, now: Instant, store: &BoardStore) -> FrameOutput {
        let mut effects = Vec::new();
        self.sync_board(store, &mut effects);
        self.poll_drag(now, &mut effects);

        let board = self.board.and_then(|id| store.board(id));
        self.refresh_layout(board);
        let edit_mode = self.board.is_some_and(|id| store.is_edit_mode(id));
        let loop_transition = self.update_loop(store, &mut effects);
        let ants_offset = self.frame_loop.advance(edit_mode);

        let active = self.drag.active().copied();
        let projected = match (board, active.as_ref()) {
            (Some(board), Some(drag)) => project(board, drag).map(|sections| {
                compute_slot_layout(Some(&sections), self.viewport.width, &self.config.metrics)
            }),
            _ => None,
        };
        let scene = projected.as_ref().unwrap_or(&self.cache.layout);

        self.animator.tick(&layout_targets(scene));

        let ghost = active.map(|d| DragGhost {
            note: d.source.note,
            rect: Rect::square(d.ghost_origin(), self.config.metrics.tile),
        });
        let frame = render(&RenderInput {
            layout: scene,
            metrics: &self.config.metrics,
            style: &self.style,
            viewport: self.viewport,
            positions: self.animator.positions(),
            hover: if self.drag.is_idle() { self.hover } else { None },
            ghost,
            edit_mode,
            ants_offset,
        });

        FrameOutput {
            frame,
            loop_transition,
            effects,
        }
    }

    // --- Internals ---------------------------------------------------------

    fn sync_board(&mut self, store: &BoardStore, effects: &mut Vec<SessionEffect>) {
        let selected = store.selected();
        if selected != self.board {
            self.cancel_drag(effects);
            self.animator.reset();
            self.hover = None;
            self.pressed = None;
            tracing::debug!(from = ?self.board, to = ?selected, "canvas board switched");
            self.board = selected;
            return;
        }
        if let Some(id) = self.board
            && !store.is_edit_mode(id)
            && !self.drag.is_idle()
        {
            self.cancel_drag(effects);
        }
    }

    fn poll_drag(&mut self, now: Instant, effects: &mut Vec<SessionEffect>) {
        if let DragOutcome::Started(note) = self.drag.poll(now) {
            effects.push(SessionEffect::DragStarted(note));
        }
    }

    fn cancel_drag(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.drag.cancel() == DragOutcome::Cancelled {
            effects.push(SessionEffect::DragCancelled);
        }
    }

    fn update_loop(
        &mut self,
        store: &BoardStore,
        effects: &mut Vec<SessionEffect>,
    ) -> LoopTransition {
        let demand = LoopDemand {
            edit_mode: self.board.is_some_and(|id| store.is_edit_mode(id)),
            dragging: !self.drag.is_idle(),
            hovering_note: matches!(self.hover, Some(HitTarget::Note { .. })),
        };
        let transition = self.frame_loop.update(demand);
        if transition != LoopTransition::Unchanged {
            effects.push(SessionEffect::FrameLoop(transition));
        }
        transition
    }

    fn refresh_layout(&mut self, board: Option<&Board>) {
        let key = LayoutKey {
            board: board.map(Board::id),
            revision: board.map_or(0, Board::revision),
            width_bits: self.viewport.width.to_bits(),
        };
        if self.cache.key == Some(key) {
            return;
        }
        self.cache.layout = compute_layout(board, self.viewport.width, &self.config.metrics);
        self.cache.key = Some(key);
        self.cache.recomputed += 1;
    }
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

fn context_menu(hit: Option<HitTarget>, position: Point) -> Option<ContextMenuRequest> {
    let (section, kind) = match hit? {
        HitTarget::SectionBackground { section } => (section, ContextMenuKind::Section),
        HitTarget::AddNote { section, .. } => (section, ContextMenuKind::AddNote),
        HitTarget::Separator { section } => (section, ContextMenuKind::Separator),
        HitTarget::Note { .. } | HitTarget::AddRow { .. } => return None,
    };
    Some(ContextMenuRequest {
        position,
        section,
        kind,
    })
}

/// Primary click released on the control it was pressed on.
fn activate(
    hit: HitTarget,
    board: BoardId,
    store: &mut BoardStore,
    effects: &mut Vec<SessionEffect>,
) -> Result<(), StoreError> {
    match hit {
        HitTarget::AddNote { section, .. } => {
            if let Some(note) = store.add_note(board, section)? {
                effects.push(SessionEffect::NoteAdded { section, note });
            }
        }
        HitTarget::AddRow { .. } => {
            let section = store.add_section(board)?;
            effects.push(SessionEffect::SectionAdded(section));
        }
        HitTarget::Note {
            section,
            index,
            note,
            ..
        } => {
            tracing::debug!(note = %note.id, section, index, "note clicked");
            effects.push(SessionEffect::NoteClicked {
                note: note.id,
                section,
                index,
            });
        }
        HitTarget::SectionBackground { .. } | HitTarget::Separator { .. } => {}
    }
    Ok(())
}

fn apply_drag_outcome(
    outcome: DragOutcome,
    board: BoardId,
    store: &mut BoardStore,
    effects: &mut Vec<SessionEffect>,
) -> Result<(), StoreError> {
    match outcome {
        DragOutcome::Click {
            note,
            section,
            index,
        } => effects.push(SessionEffect::NoteClicked {
            note,
            section,
            index,
        }),
        DragOutcome::Commit(commit) => {
            store.move_between_sections(
                board,
                commit.from_section,
                commit.from_index,
                commit.to_section,
                commit.to_index,
            )?;
            effects.push(SessionEffect::Reordered(commit));
        }
        DragOutcome::Cancelled => effects.push(SessionEffect::DragCancelled),
        DragOutcome::None
        | DragOutcome::Armed(_)
        | DragOutcome::Started(_)
        | DragOutcome::Moved => {}
    }
    Ok(())
}
