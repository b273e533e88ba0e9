#![forbid(unsafe_code)]

//! Virtual drag projection.
//!
//! While a drag is active the board is drawn as if the move had already
//! happened: the dragged note is lifted out of its section and a
//! [`Slot::Placeholder`] takes its landing position. The model itself is
//! untouched until release.

use pinboard_core::model::Board;
use pinboard_layout::{Slot, SlotSection};

use crate::drag::{ActiveDrag, landing_index};

/// Slot sections for `board` with the drag applied.
///
/// Returns `None` when the dragged note is no longer on the board. If the
/// hovered section vanished the placeholder falls back to the note's own
/// position.
#[must_use]
pub fn project(board: &Board, drag: &ActiveDrag) -> Option<Vec<SlotSection>> {
    let note = drag.source.note.id;
    let (from_section, from_index) = board.locate_note(note)?;
    let (to_section, to_index) = match board.section_index(drag.hover.section_id) {
        Some(to_section) => (
            to_section,
            landing_index(from_section, from_index, to_section, drag.hover.index),
        ),
        None => (from_section, from_index),
    };

    let mut sections: Vec<SlotSection> = board
        .sections()
        .iter()
        .map(SlotSection::from_section)
        .collect();
    sections[from_section].slots.remove(from_index);
    let dest = &mut sections[to_section].slots;
    let at = to_index.min(dest.len());
    dest.insert(at, Slot::Placeholder);
    Some(sections)
}
