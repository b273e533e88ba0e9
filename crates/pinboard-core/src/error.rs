#![forbid(unsafe_code)]

//! Store errors.

use std::fmt;

use crate::model::BoardId;

/// Errors returned by [`crate::store::BoardStore`] operations.
///
/// Only addressing a board that does not exist is an error. Bad section or
/// note indices inside an existing board are clamped or ignored instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No board with this id exists.
    UnknownBoard(BoardId),
    /// The operation needs a selected board and none is selected.
    NoBoardSelected,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBoard(id) => write!(f, "unknown board: {id}"),
            Self::NoBoardSelected => write!(f, "no board selected"),
        }
    }
}

impl std::error::Error for StoreError {}
