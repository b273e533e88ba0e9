#![forbid(unsafe_code)]

//! Frame = ordered draw list + canvas size for a render pass.
//!
//! Commands are painted in order; later commands draw on top. A backend
//! (2D canvas, GPU scene, retained DOM tree, or a test recorder) only needs
//! to understand the handful of primitives in [`DrawCmd`].
//!
//! # Usage
//!
//! ```
//! use pinboard_render::frame::{DrawCmd, Frame};
//! use pinboard_render::palette::LABEL;
//! use pinboard_core::geometry::Point;
//!
//! let mut frame = Frame::new(800.0, 600.0);
//! frame.push(DrawCmd::Text {
//!     text: "New",
//!     baseline: Point::new(24.0, 24.0),
//!     color: LABEL,
//! });
//! assert_eq!(frame.len(), 1);
//! ```

use pinboard_core::geometry::{Point, Rect};
use pinboard_core::model::NoteId;

use crate::palette::Rgba;

/// A single drawing primitive in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled and optionally stroked rounded rectangle.
    RoundRect {
        rect: Rect,
        radius: f64,
        fill: Option<Rgba>,
        stroke: Option<(Rgba, f64)>,
    },
    /// Dashed rounded outline; `offset` is the dash phase.
    DashedRoundRect {
        rect: Rect,
        radius: f64,
        color: Rgba,
        width: f64,
        dash: [f64; 2],
        offset: f64,
    },
    /// Stroked circle.
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
        width: f64,
    },
    /// Straight stroked line.
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    /// Single-line text anchored at its alphabetic baseline.
    Text {
        text: &'static str,
        baseline: Point,
        color: Rgba,
    },
    /// Soft shadow under a rounded rectangle.
    Shadow {
        rect: Rect,
        radius: f64,
        blur: f64,
        offset: Point,
        color: Rgba,
    },
    /// Marks the start of a note tile, for backends that track per-note
    /// layers. Paints nothing.
    NoteMarker { id: NoteId, rect: Rect, ghost: bool },
}

/// Draw list for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Canvas width in logical pixels.
    pub width: f64,
    /// Canvas height (full content height, not the viewport).
    pub height: f64,
    commands: Vec<DrawCmd>,
}

impl Frame {
    /// Create an empty frame.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Append a command.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    /// Commands in paint order.
    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Note markers in paint order.
    pub fn note_markers(&self) -> impl Iterator<Item = (NoteId, Rect, bool)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCmd::NoteMarker { id, rect, ghost } => Some((id, rect, ghost)),
            _ => None,
        })
    }

    /// Texts in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(*text),
            _ => None,
        })
    }
}
