#![forbid(unsafe_code)]

//! Render: board layout in, backend-agnostic draw list out.
//!
//! # Role in Pinboard
//! `pinboard-render` turns a computed [`pinboard_layout::BoardLayout`] and
//! the runtime's transient view state into a [`frame::Frame`]. It owns no
//! state between passes; every repaint is a fresh projection.
//!
//! # How it fits in the system
//! The runtime decides *what* is on screen (model layout or drag
//! projection, animated positions, hover, ghost) and calls
//! [`board::render`]. A host then walks [`frame::Frame::commands`] and
//! issues them to whatever 2D surface it has.

pub mod board;
pub mod frame;
pub mod palette;

pub use board::{DragGhost, RenderInput, RenderStyle, Viewport, render};
pub use frame::{DrawCmd, Frame};
pub use palette::{Rgba, tone_colors};
