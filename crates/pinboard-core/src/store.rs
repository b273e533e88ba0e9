#![forbid(unsafe_code)]

//! In-memory board collection.
//!
//! [`BoardStore`] is the only writer of the board model. It keeps boards in
//! creation order, tracks which board is selected and which one is waiting
//! for its initial name, and holds the per-board edit-mode flag that gates
//! dragging.
//!
//! Ids come from a single monotonic counter and note tones from a seeded
//! xorshift generator, so two stores built with the same seed and fed the
//! same operations produce identical boards.

use ahash::AHashSet;

use crate::error::StoreError;
use crate::model::{Board, BoardId, Note, NoteId, Section, SectionId, Tone};

/// Name given to freshly created boards.
pub const DEFAULT_BOARD_NAME: &str = "New board";

/// Name used when a board's initial name is committed blank.
pub const UNTITLED_BOARD_NAME: &str = "Untitled";

const DEFAULT_TONE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic tone picker (xorshift64*).
#[derive(Debug, Clone)]
struct ToneSource {
    state: u64,
}

impl ToneSource {
    fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero.
        Self {
            state: if seed == 0 { DEFAULT_TONE_SEED } else { seed },
        }
    }

    fn next_tone(&mut self) -> Tone {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        let r = x.wrapping_mul(0x2545_F491_4F6C_DD1D);
        Tone::ALL[(r >> 32) as usize % Tone::ALL.len()]
    }
}

/// Keyed collection of boards with selection and edit-mode state.
#[derive(Debug, Clone)]
pub struct BoardStore {
    boards: Vec<Board>,
    selected: Option<BoardId>,
    naming: Option<BoardId>,
    edit_mode: AHashSet<BoardId>,
    next_id: u64,
    tones: ToneSource,
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardStore {
    /// Create an empty store with the default tone seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_TONE_SEED)
    }

    /// Create an empty store whose note tones derive from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            boards: Vec::new(),
            selected: None,
            naming: None,
            edit_mode: AHashSet::new(),
            next_id: 1,
            tones: ToneSource::new(seed),
        }
    }

    // --- Reads -------------------------------------------------------------

    /// All boards in creation order.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id() == id)
    }

    /// Id of the selected board, if any.
    #[must_use]
    pub fn selected(&self) -> Option<BoardId> {
        self.selected
    }

    #[must_use]
    pub fn selected_board(&self) -> Option<&Board> {
        self.selected.and_then(|id| self.board(id))
    }

    /// The selected board id, or [`StoreError::NoBoardSelected`].
    pub fn require_selected(&self) -> Result<BoardId, StoreError> {
        self.selected.ok_or(StoreError::NoBoardSelected)
    }

    /// Board currently waiting for its name to be committed.
    #[must_use]
    pub fn naming(&self) -> Option<BoardId> {
        self.naming
    }

    /// Whether dragging is enabled on the board.
    #[must_use]
    pub fn is_edit_mode(&self, id: BoardId) -> bool {
        self.edit_mode.contains(&id)
    }

    // --- Board lifecycle ---------------------------------------------------

    /// Create a board with one section holding one note, select it, and
    /// mark it as waiting for a name.
    pub fn create_board(&mut self) -> BoardId {
        let id = BoardId(self.alloc_id());
        let section = self.fresh_section();
        self.boards
            .push(Board::new(id, DEFAULT_BOARD_NAME, vec![section]));
        self.selected = Some(id);
        self.naming = Some(id);
        tracing::debug!(board = %id, "board created");
        id
    }

    /// Commit the name typed for a board. Blank names become "Untitled".
    pub fn commit_create_name(&mut self, id: BoardId, name: &str) -> Result<(), StoreError> {
        let trimmed = name.trim();
        let final_name = if trimmed.is_empty() {
            UNTITLED_BOARD_NAME
        } else {
            trimmed
        };
        self.board_mut(id)?.set_name(final_name.to_string());
        self.naming = None;
        Ok(())
    }

    /// Put a board back into naming state.
    pub fn start_rename(&mut self, id: BoardId) -> Result<(), StoreError> {
        self.board_mut(id)?;
        self.naming = Some(id);
        Ok(())
    }

    /// Remove a board, clearing selection and naming state that pointed at it.
    pub fn delete_board(&mut self, id: BoardId) -> Result<Board, StoreError> {
        let pos = self
            .boards
            .iter()
            .position(|b| b.id() == id)
            .ok_or(StoreError::UnknownBoard(id))?;
        let removed = self.boards.remove(pos);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.naming == Some(id) {
            self.naming = None;
        }
        self.edit_mode.remove(&id);
        tracing::debug!(board = %id, "board deleted");
        Ok(removed)
    }

    /// Select a board.
    pub fn open_board(&mut self, id: BoardId) -> Result<(), StoreError> {
        self.board_mut(id)?;
        self.selected = Some(id);
        Ok(())
    }

    // --- Edit mode ---------------------------------------------------------

    pub fn set_edit_mode(&mut self, id: BoardId, enabled: bool) -> Result<(), StoreError> {
        self.board_mut(id)?;
        if enabled {
            self.edit_mode.insert(id);
        } else {
            self.edit_mode.remove(&id);
        }
        Ok(())
    }

    /// Flip edit mode and return the new value.
    pub fn toggle_edit_mode(&mut self, id: BoardId) -> Result<bool, StoreError> {
        let enabled = !self.is_edit_mode(id);
        self.set_edit_mode(id, enabled)?;
        Ok(enabled)
    }

    // --- Sections and notes ------------------------------------------------

    /// Append a section holding one fresh note.
    pub fn add_section(&mut self, id: BoardId) -> Result<SectionId, StoreError> {
        self.board_mut(id)?;
        let section = self.fresh_section();
        let section_id = section.id();
        self.board_mut(id)?.push_section(section);
        tracing::debug!(board = %id, section = %section_id, "section added");
        Ok(section_id)
    }

    /// Append a fresh note to a section. Returns `None` if the section
    /// index is out of range.
    pub fn add_note(&mut self, id: BoardId, section: usize) -> Result<Option<NoteId>, StoreError> {
        self.board_mut(id)?;
        let note = self.fresh_note();
        if self.board_mut(id)?.push_note(section, note) {
            tracing::debug!(board = %id, section, note = %note.id, "note added");
            Ok(Some(note.id))
        } else {
            tracing::warn!(board = %id, section, "add note to missing section ignored");
            Ok(None)
        }
    }

    /// See [`Board::move_within_section`].
    pub fn move_within_section(
        &mut self,
        id: BoardId,
        section: usize,
        from: usize,
        to: usize,
    ) -> Result<bool, StoreError> {
        Ok(self.board_mut(id)?.move_within_section(section, from, to))
    }

    /// See [`Board::move_between_sections`].
    pub fn move_between_sections(
        &mut self,
        id: BoardId,
        from_section: usize,
        from_index: usize,
        to_section: usize,
        to_index: usize,
    ) -> Result<bool, StoreError> {
        Ok(self
            .board_mut(id)?
            .move_between_sections(from_section, from_index, to_section, to_index))
    }

    /// Delete a section and its notes.
    ///
    /// The last remaining section is never deleted; the call returns
    /// `Ok(false)` instead.
    pub fn delete_section(&mut self, id: BoardId, section: usize) -> Result<bool, StoreError> {
        let board = self.board_mut(id)?;
        if board.sections().len() <= 1 {
            tracing::warn!(board = %id, section, "refusing to delete the last section");
            return Ok(false);
        }
        match board.remove_section(section) {
            Some(removed) => {
                tracing::debug!(
                    board = %id,
                    section = %removed.id(),
                    notes = removed.len(),
                    "section deleted"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // --- Internals ---------------------------------------------------------

    fn board_mut(&mut self, id: BoardId) -> Result<&mut Board, StoreError> {
        self.boards
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(StoreError::UnknownBoard(id))
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn fresh_note(&mut self) -> Note {
        let id = NoteId(self.alloc_id());
        Note::new(id, self.tones.next_tone())
    }

    fn fresh_section(&mut self) -> Section {
        let id = SectionId(self.alloc_id());
        let note = self.fresh_note();
        Section::new(id, vec![note])
    }
}
