#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native pointer and viewport notifications into
//! [`Event`] values. Pointer coordinates are in canvas space: the host adds
//! the current scroll offset before handing them over.
//!
//! # Design Notes
//!
//! - Only a single pointer is modeled; touch input maps onto `Primary`.
//! - `Cancel` mirrors a platform pointer-cancel and always abandons a drag.

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer event.
    Pointer(PointerEvent),

    /// The scroll container was resized.
    Resize {
        /// New viewport width in logical pixels.
        width: f64,
        /// New viewport height in logical pixels.
        height: f64,
    },

    /// The scroll container was scrolled; `top` is the new scroll offset.
    Scroll { top: f64 },

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Position in canvas coordinates.
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }

    /// Button press at `(x, y)`.
    #[must_use]
    pub const fn down(button: PointerButton, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(button), x, y)
    }

    /// Button release at `(x, y)`.
    #[must_use]
    pub const fn up(button: PointerButton, x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(button), x, y)
    }

    /// Movement to `(x, y)`, with or without a button held.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }
}

impl From<PointerEvent> for Event {
    fn from(event: PointerEvent) -> Self {
        Event::Pointer(event)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Button released.
    Up(PointerButton),
    /// Pointer moved.
    Move,
    /// Pointer left the canvas.
    Leave,
    /// The platform cancelled the pointer stream.
    Cancel,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button or touch contact.
    Primary,
    /// Right mouse button (context menu).
    Secondary,
    /// Middle mouse button.
    Middle,
}
