#![forbid(unsafe_code)]

//! Board model: boards own ordered sections, sections own ordered notes.
//!
//! # Invariants
//!
//! 1. A note id appears in exactly one section of a board. Moves remove and
//!    reinsert inside a single `&mut self` call, so no observer can see a
//!    note in neither or both sections.
//! 2. Sections are addressed by position in every public operation. Each
//!    section also carries a [`SectionId`] that never changes, so callers
//!    holding on to a section across model edits can re-resolve its index.
//! 3. Empty sections are kept; nothing here removes a section implicitly.
//! 4. Every mutation that changes the board bumps [`Board::revision`].
//!
//! # Failure Modes
//!
//! Index arguments never panic. Note indices clamp into range; section
//! indices outside the board turn the operation into a no-op that returns
//! `false` and logs a warning.

use std::fmt;

/// Stable identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteId(pub u64);

/// Stable identifier of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionId(pub u64);

/// Stable identifier of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "note-{}", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section-{}", self.0)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board-{}", self.0)
    }
}

/// Color tone of a note tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tone {
    #[default]
    Yellow,
    Sky,
    Emerald,
    Amber,
    Rose,
    Violet,
    Lime,
}

impl Tone {
    /// Every tone, in palette order.
    pub const ALL: [Tone; 7] = [
        Tone::Yellow,
        Tone::Sky,
        Tone::Emerald,
        Tone::Amber,
        Tone::Rose,
        Tone::Violet,
        Tone::Lime,
    ];

    /// Lowercase palette name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Tone::Yellow => "yellow",
            Tone::Sky => "sky",
            Tone::Emerald => "emerald",
            Tone::Amber => "amber",
            Tone::Rose => "rose",
            Tone::Violet => "violet",
            Tone::Lime => "lime",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single movable tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    pub id: NoteId,
    pub tone: Tone,
}

impl Note {
    #[must_use]
    pub const fn new(id: NoteId, tone: Tone) -> Self {
        Self { id, tone }
    }
}

/// An ordered row-group of notes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    id: SectionId,
    notes: Vec<Note>,
}

impl Section {
    #[must_use]
    pub fn new(id: SectionId, notes: Vec<Note>) -> Self {
        Self { id, notes }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> SectionId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Position of a note within this section.
    #[must_use]
    pub fn position(&self, note: NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == note)
    }
}

/// A named board of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    id: BoardId,
    name: String,
    sections: Vec<Section>,
    revision: u64,
}

impl Board {
    /// Create a board from already-built sections.
    #[must_use]
    pub fn new(id: BoardId, name: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            id,
            name: name.into(),
            sections,
            revision: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> BoardId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Monotonic mutation counter, used to invalidate derived layouts.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current index of the section with the given id.
    #[must_use]
    pub fn section_index(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// `(section index, note index)` of a note.
    #[must_use]
    pub fn locate_note(&self, note: NoteId) -> Option<(usize, usize)> {
        self.sections
            .iter()
            .enumerate()
            .find_map(|(si, s)| s.position(note).map(|ni| (si, ni)))
    }

    /// Total number of notes across all sections.
    #[must_use]
    pub fn note_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Move a note inside one section.
    ///
    /// Removes the note at `from` and inserts it so that it ends up at
    /// position `to` of the resulting sequence. Callers that computed `to`
    /// against the pre-removal ordering must subtract one when `to > from`
    /// before calling. `from` clamps to the last note and `to` clamps to
    /// `[0, len]`.
    ///
    /// Returns `true` if the order changed.
    pub fn move_within_section(&mut self, section: usize, from: usize, to: usize) -> bool {
        let Some(sec) = self.sections.get_mut(section) else {
            tracing::warn!(board = %self.id, section, "move within missing section ignored");
            return false;
        };
        if sec.notes.is_empty() {
            return false;
        }
        let from = from.min(sec.notes.len() - 1);
        let note = sec.notes.remove(from);
        let to = to.min(sec.notes.len());
        sec.notes.insert(to, note);
        if from == to {
            return false;
        }
        self.revision += 1;
        tracing::debug!(board = %self.id, section, from, to, note = %note.id, "note moved within section");
        true
    }

    /// Move a note from one section to another.
    ///
    /// No index correction is applied: the source and destination are
    /// independent sequences. When both indices name the same section this
    /// delegates to [`Board::move_within_section`].
    ///
    /// Returns `true` if the note moved.
    pub fn move_between_sections(
        &mut self,
        from_section: usize,
        from_index: usize,
        to_section: usize,
        to_index: usize,
    ) -> bool {
        if from_section == to_section {
            return self.move_within_section(from_section, from_index, to_index);
        }
        let len = self.sections.len();
        if from_section >= len || to_section >= len {
            tracing::warn!(
                board = %self.id,
                from_section,
                to_section,
                sections = len,
                "move between missing sections ignored"
            );
            return false;
        }
        let source = &mut self.sections[from_section].notes;
        if source.is_empty() {
            return false;
        }
        let from_index = from_index.min(source.len() - 1);
        let note = source.remove(from_index);
        let dest = &mut self.sections[to_section].notes;
        let to_index = to_index.min(dest.len());
        dest.insert(to_index, note);
        self.revision += 1;
        tracing::debug!(
            board = %self.id,
            from_section,
            from_index,
            to_section,
            to_index,
            note = %note.id,
            "note moved between sections"
        );
        true
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
        self.revision += 1;
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
        self.revision += 1;
    }

    pub(crate) fn push_note(&mut self, section: usize, note: Note) -> bool {
        let Some(sec) = self.sections.get_mut(section) else {
            return false;
        };
        sec.notes.push(note);
        self.revision += 1;
        true
    }

    pub(crate) fn remove_section(&mut self, section: usize) -> Option<Section> {
        if section >= self.sections.len() {
            return None;
        }
        let removed = self.sections.remove(section);
        self.revision += 1;
        Some(removed)
    }
}
