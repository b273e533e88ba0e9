#![forbid(unsafe_code)]

//! Explicit animation loop state.
//!
//! The canvas only needs per-frame callbacks while something can move: edit
//! mode (marching ants), a pending or active drag, or a hovered note. The
//! host owns the actual repeating callback; [`FrameLoop::update`] tells it
//! when to schedule or cancel one.

/// Dash phase wraps here so the offset never loses precision.
const ANTS_PERIOD: f64 = 10_000.0;

/// Conditions that keep the loop alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopDemand {
    pub edit_mode: bool,
    pub dragging: bool,
    pub hovering_note: bool,
}

impl LoopDemand {
    #[inline]
    #[must_use]
    pub fn any(&self) -> bool {
        self.edit_mode || self.dragging || self.hovering_note
    }
}

/// Change in loop state reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopTransition {
    /// Schedule a repeating frame callback.
    Started,
    /// Cancel the repeating frame callback.
    Stopped,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
    ants_speed: f64,
    ants_offset: f64,
}

impl FrameLoop {
    #[must_use]
    pub fn new(ants_speed: f64) -> Self {
        Self {
            running: false,
            frames: 0,
            ants_speed,
            ants_offset: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames advanced since creation.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    #[must_use]
    pub fn ants_offset(&self) -> f64 {
        self.ants_offset
    }

    /// Start or stop according to `demand`.
    pub fn update(&mut self, demand: LoopDemand) -> LoopTransition {
        let wanted = demand.any();
        if wanted == self.running {
            return LoopTransition::Unchanged;
        }
        self.running = wanted;
        if wanted {
            tracing::debug!(
                edit_mode = demand.edit_mode,
                dragging = demand.dragging,
                hovering_note = demand.hovering_note,
                "frame loop started"
            );
            LoopTransition::Started
        } else {
            tracing::debug!(frames = self.frames, "frame loop stopped");
            LoopTransition::Stopped
        }
    }

    /// Count one frame; the ants phase only advances in edit mode.
    pub fn advance(&mut self, edit_mode: bool) -> f64 {
        self.frames += 1;
        if edit_mode {
            self.ants_offset = (self.ants_offset + self.ants_speed) % ANTS_PERIOD;
        }
        self.ants_offset
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(0.35)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_edges_only() {
        let mut fl = FrameLoop::default();
        let on = LoopDemand {
            hovering_note: true,
            ..LoopDemand::default()
        };
        assert_eq!(fl.update(LoopDemand::default()), LoopTransition::Unchanged);
        assert_eq!(fl.update(on), LoopTransition::Started);
        assert_eq!(fl.update(on), LoopTransition::Unchanged);
        assert!(fl.is_running());
        assert_eq!(fl.update(LoopDemand::default()), LoopTransition::Stopped);
        assert!(!fl.is_running());
    }

    #[test]
    fn ants_advance_in_edit_mode_only() {
        let mut fl = FrameLoop::new(0.5);
        assert_eq!(fl.advance(false), 0.0);
        assert_eq!(fl.advance(true), 0.5);
        assert_eq!(fl.advance(true), 1.0);
        assert_eq!(fl.frames(), 3);
    }

    #[test]
    fn ants_offset_wraps() {
        let mut fl = FrameLoop::new(4_000.0);
        fl.advance(true);
        fl.advance(true);
        assert_eq!(fl.advance(true), 2_000.0);
    }
}
