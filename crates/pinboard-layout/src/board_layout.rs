#![forbid(unsafe_code)]

//! Board layout engine.
//!
//! [`compute_layout`] maps `(board, viewport width, metrics)` to a flat list
//! of positioned rows: for every section a [`SeparatorRow`] followed by a
//! [`GridRow`], then one trailing separator and the add-row control.
//!
//! # Invariants
//!
//! 1. Pure and deterministic: equal inputs give bit-identical rectangles.
//! 2. Column count is `max(1, floor((inner + gutter) / (tile + gutter)))`,
//!    recomputed from scratch on every call.
//! 3. Every grid reserves the line holding its add-note slot, so an empty
//!    section is exactly one tile tall.
//! 4. Rows are emitted top to bottom with non-decreasing `y`; tiles in a
//!    grid are pairwise non-overlapping and aligned to `tile + gutter`.
//!
//! # Failure Modes
//!
//! A missing board yields no rows, no add-row control, and a height of
//! `top_pad + bottom_pad`. Negative or non-finite viewport widths are
//! treated as zero, which still lays out a single column.

use pinboard_core::geometry::{Point, Rect};
use pinboard_core::model::{Board, Note, NoteId, Section, SectionId};

use crate::metrics::LayoutMetrics;

/// Positional separator label for the section at `index`.
///
/// The trailing separator uses `index == sections.len()`.
#[must_use]
pub const fn section_label(index: usize) -> &'static str {
    match index {
        0 => "New",
        1 => "Second block",
        _ => "Next block",
    }
}

/// One slot of a section as seen by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A real note.
    Note(Note),
    /// Reserved gap where a dragged note would land.
    Placeholder,
}

/// A section's ordered slots. The layout engine only ever sees these, so a
/// drag projection lays out with exactly the same rules as the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSection {
    pub id: SectionId,
    pub slots: Vec<Slot>,
}

impl SlotSection {
    /// Slots for a model section, in order.
    #[must_use]
    pub fn from_section(section: &Section) -> Self {
        Self {
            id: section.id(),
            slots: section.notes().iter().copied().map(Slot::Note).collect(),
        }
    }
}

/// Horizontal frame of the content area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentGeometry {
    /// Left edge of the (centered) content area.
    pub content_offset_x: f64,
    /// Width of the content area, capped at `content_max_width`.
    pub content_width: f64,
    /// Content width minus horizontal padding.
    pub inner_width: f64,
    /// Left edge of the first tile column.
    pub content_x: f64,
    /// Tiles per line.
    pub columns: usize,
}

impl ContentGeometry {
    /// Whether `x` lies in the padded content band.
    #[inline]
    #[must_use]
    pub fn band_contains(&self, x: f64) -> bool {
        x >= self.content_x && x <= self.content_x + self.inner_width
    }
}

/// A note placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedNote {
    pub rect: Rect,
    pub note: Note,
    /// Section index.
    pub section: usize,
    /// Position within the laid-out section.
    pub index: usize,
}

/// Labeled divider above a section, or the trailing divider.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorRow {
    pub y: f64,
    pub height: f64,
    pub label: &'static str,
    pub label_x: f64,
    /// Section below this separator; `None` for the trailing separator.
    pub section: Option<usize>,
}

/// A section's tile grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub y: f64,
    pub height: f64,
    pub section: usize,
    pub section_id: SectionId,
    pub items: Vec<PositionedNote>,
    /// Drag landing slot, present only in projected layouts.
    pub placeholder: Option<Rect>,
    /// Trailing add-note control.
    pub add_note: Rect,
}

/// A laid-out row.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutRow {
    Separator(SeparatorRow),
    Grid(GridRow),
}

impl LayoutRow {
    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        match self {
            Self::Separator(s) => s.y,
            Self::Grid(g) => g.y,
        }
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        match self {
            Self::Separator(s) => s.height,
            Self::Grid(g) => g.height,
        }
    }

    /// Whether the closed vertical span `[y, y + height]` contains `y`.
    #[inline]
    #[must_use]
    pub fn spans(&self, y: f64) -> bool {
        y >= self.y() && y <= self.y() + self.height()
    }
}

/// Full board layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub rows: Vec<LayoutRow>,
    pub total_height: f64,
    /// The add-row control; absent when there is no board.
    pub add_row: Option<Rect>,
    pub geometry: ContentGeometry,
}

impl BoardLayout {
    /// Grid row of a section.
    #[must_use]
    pub fn grid(&self, section: usize) -> Option<&GridRow> {
        self.grids().find(|g| g.section == section)
    }

    /// All grid rows, top to bottom.
    pub fn grids(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter().filter_map(|r| match r {
            LayoutRow::Grid(g) => Some(g),
            LayoutRow::Separator(_) => None,
        })
    }

    /// All positioned notes in section order.
    pub fn notes(&self) -> impl Iterator<Item = &PositionedNote> {
        self.grids().flat_map(|g| g.items.iter())
    }

    /// Rectangle of a note, if it is laid out.
    #[must_use]
    pub fn note_rect(&self, id: NoteId) -> Option<Rect> {
        self.notes().find(|p| p.note.id == id).map(|p| p.rect)
    }

    /// Number of sections laid out.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.grids().count()
    }
}

/// Compute the layout of a board.
#[must_use]
pub fn compute_layout(
    board: Option<&Board>,
    viewport_width: f64,
    metrics: &LayoutMetrics,
) -> BoardLayout {
    let sections: Option<Vec<SlotSection>> =
        board.map(|b| b.sections().iter().map(SlotSection::from_section).collect());
    compute_slot_layout(sections.as_deref(), viewport_width, metrics)
}

/// Compute the layout of an arbitrary slot projection.
#[must_use]
pub fn compute_slot_layout(
    sections: Option<&[SlotSection]>,
    viewport_width: f64,
    metrics: &LayoutMetrics,
) -> BoardLayout {
    let viewport_width = if viewport_width.is_finite() {
        viewport_width.max(0.0)
    } else {
        0.0
    };
    let content_width = viewport_width.min(metrics.content_max_width);
    let content_offset_x = ((viewport_width - content_width) / 2.0).floor();
    let inner_width = (content_width - metrics.content_pad_x * 2.0).max(0.0);
    let content_x = content_offset_x + metrics.content_pad_x;
    let tile = metrics.tile;
    let pitch = metrics.pitch();
    let columns = (((inner_width + metrics.gutter) / pitch).floor() as usize).max(1);

    let geometry = ContentGeometry {
        content_offset_x,
        content_width,
        inner_width,
        content_x,
        columns,
    };

    let Some(sections) = sections else {
        return BoardLayout {
            rows: Vec::new(),
            total_height: metrics.top_pad + metrics.bottom_pad,
            add_row: None,
            geometry,
        };
    };

    let mut y = metrics.top_pad;
    let mut rows = Vec::with_capacity(sections.len() * 2 + 1);

    for (section, slot_section) in sections.iter().enumerate() {
        rows.push(LayoutRow::Separator(SeparatorRow {
            y,
            height: metrics.separator_height,
            label: section_label(section),
            label_x: content_x,
            section: Some(section),
        }));
        y += metrics.separator_height;

        let mut items = Vec::with_capacity(slot_section.slots.len());
        let mut placeholder = None;
        let mut col = 0usize;
        let mut line = 0usize;
        let slot_rect = |col: usize, line: usize| {
            Rect::square(
                Point::new(
                    content_x + col as f64 * pitch,
                    y + line as f64 * pitch,
                ),
                tile,
            )
        };

        for (index, slot) in slot_section.slots.iter().enumerate() {
            let rect = slot_rect(col, line);
            match *slot {
                Slot::Note(note) => items.push(PositionedNote {
                    rect,
                    note,
                    section,
                    index,
                }),
                Slot::Placeholder => placeholder = Some(rect),
            }
            col += 1;
            if col >= columns {
                col = 0;
                line += 1;
            }
        }

        let add_note = slot_rect(col, line);
        let lines_used = (line + 1) as f64;
        let height = lines_used * tile + (lines_used - 1.0) * metrics.gutter;

        rows.push(LayoutRow::Grid(GridRow {
            y,
            height,
            section,
            section_id: slot_section.id,
            items,
            placeholder,
            add_note,
        }));
        y += height + metrics.row_gap;
    }

    rows.push(LayoutRow::Separator(SeparatorRow {
        y,
        height: metrics.separator_height,
        label: section_label(sections.len()),
        label_x: content_x,
        section: None,
    }));
    y += metrics.separator_height;

    let add_row = Rect::square(Point::new(content_x, y), tile);
    y += tile;

    tracing::trace!(
        sections = sections.len(),
        columns,
        total_height = y + metrics.bottom_pad,
        "board layout computed"
    );

    BoardLayout {
        rows,
        total_height: y + metrics.bottom_pad,
        add_row: Some(add_row),
        geometry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_core::model::{BoardId, Tone};

    fn board(sizes: &[usize]) -> Board {
        let mut next = 0;
        let sections = sizes
            .iter()
            .enumerate()
            .map(|(si, &n)| {
                let notes = (0..n)
                    .map(|_| {
                        next += 1;
                        Note::new(NoteId(next), Tone::Sky)
                    })
                    .collect();
                Section::new(SectionId(si as u64), notes)
            })
            .collect();
        Board::new(BoardId(1), "Layout", sections)
    }

    #[test]
    fn missing_board_is_padding_only() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(None, 800.0, &m);
        assert!(layout.rows.is_empty());
        assert!(layout.add_row.is_none());
        assert_eq!(layout.total_height, m.top_pad + m.bottom_pad);
    }

    #[test]
    fn columns_follow_inner_width() {
        let m = LayoutMetrics::default();
        // inner = 1000 - 48 = 952; (952 + 16) / 196 = 4.94 -> 4 columns
        let layout = compute_layout(Some(&board(&[1])), 1000.0, &m);
        assert_eq!(layout.geometry.columns, 4);
        assert_eq!(layout.geometry.inner_width, 952.0);
        // Narrow viewport still yields one column.
        let layout = compute_layout(Some(&board(&[1])), 50.0, &m);
        assert_eq!(layout.geometry.columns, 1);
    }

    #[test]
    fn wide_viewport_centers_content() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(Some(&board(&[1])), 2001.0, &m);
        assert_eq!(layout.geometry.content_width, 1600.0);
        assert_eq!(layout.geometry.content_offset_x, 200.0);
        assert_eq!(layout.geometry.content_x, 224.0);
    }

    #[test]
    fn labels_are_positional() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(Some(&board(&[1, 1, 1])), 800.0, &m);
        let labels: Vec<&str> = layout
            .rows
            .iter()
            .filter_map(|r| match r {
                LayoutRow::Separator(s) => Some(s.label),
                LayoutRow::Grid(_) => None,
            })
            .collect();
        assert_eq!(labels, ["New", "Second block", "Next block", "Next block"]);
    }

    #[test]
    fn empty_section_is_one_tile_tall_with_add_note_first() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(Some(&board(&[0])), 800.0, &m);
        let grid = layout.grid(0).unwrap();
        assert_eq!(grid.height, m.tile);
        assert!(grid.items.is_empty());
        assert_eq!(grid.add_note.x, layout.geometry.content_x);
        assert_eq!(grid.add_note.y, grid.y);
    }

    #[test]
    fn full_line_wraps_add_note() {
        let m = LayoutMetrics::default();
        // 1000px -> 4 columns; 4 notes fill the first line.
        let layout = compute_layout(Some(&board(&[4])), 1000.0, &m);
        let grid = layout.grid(0).unwrap();
        assert_eq!(grid.add_note.y, grid.y + m.pitch());
        assert_eq!(grid.add_note.x, layout.geometry.content_x);
        assert_eq!(grid.height, 2.0 * m.tile + m.gutter);
    }

    #[test]
    fn total_height_matches_stacked_rows() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(Some(&board(&[2, 0])), 1000.0, &m);
        let expected = m.top_pad
            + (m.separator_height + m.tile + m.row_gap) * 2.0
            + m.separator_height
            + m.tile
            + m.bottom_pad;
        assert_eq!(layout.total_height, expected);
        let add_row = layout.add_row.unwrap();
        assert_eq!(add_row.bottom() + m.bottom_pad, layout.total_height);
    }

    #[test]
    fn zero_sections_keeps_trailing_controls() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(Some(&board(&[])), 800.0, &m);
        assert_eq!(layout.rows.len(), 1);
        assert!(layout.add_row.is_some());
        assert_eq!(layout.section_count(), 0);
    }

    #[test]
    fn placeholder_takes_a_slot() {
        let m = LayoutMetrics::default();
        let sections = vec![SlotSection {
            id: SectionId(0),
            slots: vec![
                Slot::Note(Note::new(NoteId(1), Tone::Lime)),
                Slot::Placeholder,
                Slot::Note(Note::new(NoteId(2), Tone::Rose)),
            ],
        }];
        let layout = compute_slot_layout(Some(&sections), 1000.0, &m);
        let grid = layout.grid(0).unwrap();
        let x0 = layout.geometry.content_x;
        assert_eq!(grid.placeholder.unwrap().x, x0 + m.pitch());
        assert_eq!(grid.items[1].rect.x, x0 + 2.0 * m.pitch());
        assert_eq!(grid.items[1].index, 2);
        assert_eq!(grid.add_note.x, x0 + 3.0 * m.pitch());
    }

    #[test]
    fn non_finite_width_degrades_to_single_column() {
        let m = LayoutMetrics::default();
        let layout = compute_layout(Some(&board(&[2])), f64::NAN, &m);
        assert_eq!(layout.geometry.columns, 1);
        assert_eq!(layout.geometry.content_width, 0.0);
    }
}
