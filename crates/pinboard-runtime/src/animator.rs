#![forbid(unsafe_code)]

//! Exponential-smoothing position animator.
//!
//! Each tile has a rendered position that chases its layout target: every
//! tick covers `smoothing` of the remaining distance, and a tile closer than
//! `snap_epsilon` lands exactly.
//!
//! # Invariants
//!
//! 1. For `smoothing` in `(0, 1]` the distance to target never increases and
//!    a position never overshoots.
//! 2. Entries are created lazily at their target, so a tile seen for the
//!    first time does not fly in.
//! 3. After a tick the map holds exactly the target ids. A dragged note is
//!    absent from the projected targets, so it is untracked while dragged
//!    and reappears at its new slot after release.
//!
//! # Failure Modes
//!
//! - `smoothing` outside `(0, 1]` is clamped; zero would never converge.

use ahash::AHashMap;
use pinboard_core::geometry::Point;
use pinboard_core::model::NoteId;
use pinboard_layout::BoardLayout;

/// Smallest accepted smoothing factor.
const MIN_SMOOTHING: f64 = 1e-3;

/// Top-left corners of every laid-out note.
#[must_use]
pub fn layout_targets(layout: &BoardLayout) -> AHashMap<NoteId, Point> {
    layout
        .notes()
        .map(|p| (p.note.id, p.rect.origin()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct PositionAnimator {
    smoothing: f64,
    snap_epsilon: f64,
    positions: AHashMap<NoteId, Point>,
    moving: usize,
}

impl PositionAnimator {
    #[must_use]
    pub fn new(smoothing: f64, snap_epsilon: f64) -> Self {
        let smoothing = if smoothing.is_finite() {
            smoothing.clamp(MIN_SMOOTHING, 1.0)
        } else {
            1.0
        };
        Self {
            smoothing,
            snap_epsilon: snap_epsilon.max(0.0),
            positions: AHashMap::new(),
            moving: 0,
        }
    }

    /// Current rendered positions.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &AHashMap<NoteId, Point> {
        &self.positions
    }

    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether the last tick left every tile on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.moving == 0
    }

    /// Advance one frame toward `targets`.
    ///
    /// Returns the number of tiles still in motion.
    pub fn tick(&mut self, targets: &AHashMap<NoteId, Point>) -> usize {
        self.positions.retain(|id, _| targets.contains_key(id));

        let mut moving = 0;
        for (&id, &target) in targets {
            let current = self.positions.entry(id).or_insert(target);
            if *current == target {
                continue;
            }
            let next = current.lerp(target, self.smoothing);
            if next.distance(target) <= self.snap_epsilon {
                *current = target;
            } else {
                *current = next;
                moving += 1;
            }
        }
        self.moving = moving;
        moving
    }

    /// Drop every tracked position.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.moving = 0;
    }
}

impl Default for PositionAnimator {
    fn default() -> Self {
        Self::new(0.2, 0.5)
    }
}
