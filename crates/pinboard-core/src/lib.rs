#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and the board model.
//!
//! # Role in Pinboard
//! `pinboard-core` is the vocabulary layer. It owns the authoritative board
//! model (boards, sections, notes), the in-memory [`store::BoardStore`] that
//! mutates it, and the geometric and input types every other crate speaks.
//!
//! # Primary responsibilities
//! - **Model**: [`model::Board`], [`model::Section`], [`model::Note`] with
//!   index-based reorder operations that clamp instead of failing.
//! - **Store**: keyed board collection, selection, and per-board edit mode.
//! - **Geometry**: floating-point [`geometry::Point`] and [`geometry::Rect`].
//! - **Events**: canonical pointer events consumed by the runtime.
//!
//! # How it fits in the system
//! `pinboard-layout` turns a [`model::Board`] into positioned rows,
//! `pinboard-runtime` feeds [`event::Event`] values through the drag engine,
//! and `pinboard-render` paints the result. None of those crates mutate the
//! model except through the operations defined here.

pub mod error;
pub mod event;
pub mod geometry;
pub mod model;
pub mod store;

pub use error::StoreError;
pub use event::{Event, PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{Point, Rect};
pub use model::{Board, BoardId, Note, NoteId, Section, SectionId, Tone};
pub use store::BoardStore;
