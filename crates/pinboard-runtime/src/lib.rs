#![forbid(unsafe_code)]

//! Runtime: everything on the canvas that changes between frames.
//!
//! # Role in Pinboard
//! Layout and rendering are pure; this crate holds the state that survives
//! across calls and decides what gets laid out and drawn.
//!
//! # Primary responsibilities
//! - **Drag engine** ([`drag`]): press, arm, drag, commit, with injected time.
//! - **Projection** ([`projection`]): the board as it would look after the
//!   drop, for rendering during a drag.
//! - **Animator** ([`animator`]): smoothed tile positions.
//! - **Frame loop** ([`frame_loop`]): when the host needs per-frame ticks.
//! - **Session** ([`session`]): wires the above to a [`pinboard_core::BoardStore`].
//! - **Config** ([`config`]): tunables, loadable from TOML/JSON.

pub mod animator;
pub mod config;
pub mod drag;
pub mod frame_loop;
pub mod projection;
pub mod session;

pub use animator::{PositionAnimator, layout_targets};
pub use config::{AnimationConfig, CanvasConfig, ConfigError, InteractionConfig, RenderConfig};
pub use drag::{
    ActiveDrag, DragController, DragOutcome, DragPhase, DragSource, HoverSlot, ReorderCommit,
    landing_index,
};
pub use frame_loop::{FrameLoop, LoopDemand, LoopTransition};
pub use projection::project;
pub use session::{
    CanvasSession, ContextMenuKind, ContextMenuRequest, FrameOutput, SessionEffect,
};
pub use web_time::{Duration, Instant};
