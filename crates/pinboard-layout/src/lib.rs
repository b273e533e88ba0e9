#![forbid(unsafe_code)]

//! Board layout and hit testing.
//!
//! Both entry points are pure functions of their inputs: [`compute_layout`]
//! turns a board into positioned rows, and [`hit_test`] answers what lies
//! under a canvas point. Nothing here caches or mutates; callers rebuild
//! the layout wholesale whenever the board or viewport width changes.

pub mod board_layout;
pub mod metrics;

pub use board_layout::{
    BoardLayout, ContentGeometry, GridRow, LayoutRow, PositionedNote, SeparatorRow, Slot,
    SlotSection, compute_layout, compute_slot_layout, section_label,
};
pub use hit_test::{HitTarget, hit_test};
pub use metrics::LayoutMetrics;
pub use pinboard_core::geometry::{Point, Rect};
