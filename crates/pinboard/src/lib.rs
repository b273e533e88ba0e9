#![forbid(unsafe_code)]

//! Pinboard public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a prelude
//! for day-to-day usage.
//!
//! ```
//! use pinboard::prelude::*;
//!
//! let mut store = BoardStore::new();
//! let board = store.create_board();
//! store.set_edit_mode(board, true)?;
//!
//! let mut session = CanvasSession::default();
//! session.set_viewport(1024.0, 768.0);
//! let out = session.tick(Instant::now(), &store);
//! assert!(!out.frame.is_empty());
//! # Ok::<(), pinboard::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use pinboard_core::error::StoreError;
pub use pinboard_core::event::{Event, PointerButton, PointerEvent, PointerEventKind};
pub use pinboard_core::geometry::{Point, Rect};
pub use pinboard_core::model::{Board, BoardId, Note, NoteId, Section, SectionId, Tone};
pub use pinboard_core::store::BoardStore;

// --- Layout re-exports -----------------------------------------------------

pub use pinboard_layout::{BoardLayout, HitTarget, LayoutMetrics, compute_layout, hit_test};

// --- Render re-exports -----------------------------------------------------

pub use pinboard_render::{DrawCmd, Frame, Rgba, Viewport};

// --- Runtime re-exports ----------------------------------------------------

pub use pinboard_runtime::{
    CanvasConfig, CanvasSession, ConfigError, ContextMenuKind, ContextMenuRequest, FrameOutput,
    Instant, LoopTransition, ReorderCommit, SessionEffect,
};

#[cfg(feature = "logging")]
pub mod logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Pinboard hosts.
#[derive(Debug)]
pub enum Error {
    /// A store operation named a board that does not exist.
    Store(StoreError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Pinboard APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a typical host needs.
pub mod prelude {
    pub use crate::{
        Board, BoardId, BoardStore, CanvasConfig, CanvasSession, DrawCmd, Error, Event, Frame,
        HitTarget, Instant, LoopTransition, Point, PointerButton, PointerEvent, Rect, Result,
        SessionEffect, Viewport,
    };

    pub use crate::{core, layout, render, runtime};
}

pub use pinboard_core as core;
pub use pinboard_layout as layout;
pub use pinboard_render as render;
pub use pinboard_runtime as runtime;
