#![forbid(unsafe_code)]

//! Stateless board renderer.
//!
//! [`render`] projects a [`BoardLayout`] plus transient view state (animated
//! positions, hover, drag ghost, ants phase) into a [`Frame`]. It reads
//! nothing else and mutates nothing, so repainting the same input always
//! yields the same draw list.
//!
//! # Paint order
//!
//! 1. Rows top to bottom, culled against the viewport plus a margin:
//!    separators (label, rule), then per grid its notes, marching ants in
//!    edit mode, the drop placeholder, and the add-note control.
//! 2. The add-row control.
//! 3. The drag ghost, scaled and shadowed, on top of everything.
//!
//! # Invariants
//!
//! - Rows whose vertical span lies entirely outside
//!   `[scroll_top - margin, scroll_top + height + margin]` emit nothing.
//! - A note with an animated position draws there; otherwise at its layout
//!   rectangle.
//! - At most one ghost is drawn, and it is always the last note marker.

use ahash::AHashMap;
use pinboard_core::geometry::{Point, Rect};
use pinboard_core::model::{Note, NoteId};
use pinboard_layout::{BoardLayout, GridRow, HitTarget, LayoutMetrics, LayoutRow, SeparatorRow};

use crate::frame::{DrawCmd, Frame};
use crate::palette::{self, Rgba};

/// Visible part of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_top: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64, scroll_top: f64) -> Self {
        Self {
            width,
            height,
            scroll_top,
        }
    }

    /// Bottom edge in canvas coordinates.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.height
    }
}

/// Renderer knobs that are not layout geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Extra distance above and below the viewport that is still painted.
    pub cull_margin: f64,
    /// Scale applied to the drag ghost.
    pub drag_scale: f64,
    /// `[dash, gap]` of the marching-ants outline.
    pub ants_dash: [f64; 2],
    pub ants_width: f64,
    /// Distance of the ants path outside the tile.
    pub ants_outset: f64,
    pub add_circle_radius: f64,
    pub add_circle_stroke: f64,
    /// Half length of each arm of the plus glyph.
    pub add_glyph_half: f64,
    pub add_glyph_stroke: f64,
    pub shadow_blur: f64,
    pub shadow_offset: Point,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cull_margin: 200.0,
            drag_scale: 1.04,
            ants_dash: [6.0, 3.0],
            ants_width: 2.0,
            ants_outset: 6.0,
            add_circle_radius: 16.0,
            add_circle_stroke: 2.0,
            add_glyph_half: 8.0,
            add_glyph_stroke: 2.0,
            shadow_blur: 16.0,
            shadow_offset: Point::new(0.0, 6.0),
        }
    }
}

/// The note following the pointer during an active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGhost {
    pub note: Note,
    /// Unscaled tile rectangle at `pointer - grab offset`.
    pub rect: Rect,
}

/// Everything one render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub layout: &'a BoardLayout,
    pub metrics: &'a LayoutMetrics,
    pub style: &'a RenderStyle,
    pub viewport: Viewport,
    /// Current animated top-left corner per note.
    pub positions: &'a AHashMap<NoteId, Point>,
    pub hover: Option<HitTarget>,
    pub ghost: Option<DragGhost>,
    pub edit_mode: bool,
    /// Marching-ants dash phase.
    pub ants_offset: f64,
}

/// Render a board into a draw list.
#[must_use]
pub fn render(input: &RenderInput<'_>) -> Frame {
    let layout = input.layout;
    let mut frame = Frame::new(input.viewport.width.max(1.0), layout.total_height.max(1.0));

    let top = input.viewport.scroll_top - input.style.cull_margin;
    let bottom = input.viewport.bottom() + input.style.cull_margin;
    #[cfg(feature = "tracing")]
    let mut painted_rows = 0usize;

    for row in &layout.rows {
        if row.y() > bottom {
            break;
        }
        if row.y() + row.height() < top {
            continue;
        }
        #[cfg(feature = "tracing")]
        {
            painted_rows += 1;
        }
        match row {
            LayoutRow::Separator(sep) => draw_separator(&mut frame, sep, input),
            LayoutRow::Grid(grid) => draw_grid(&mut frame, grid, input),
        }
    }

    if let Some(add_row) = layout.add_row
        && add_row.bottom() >= top
        && add_row.y <= bottom
    {
        let hovered = matches!(input.hover, Some(HitTarget::AddRow { .. }));
        draw_add_control(&mut frame, add_row, hovered, input);
    }

    if let Some(ghost) = input.ghost {
        draw_ghost(&mut frame, ghost, input);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        rows = painted_rows,
        commands = frame.len(),
        ghost = input.ghost.is_some(),
        "board rendered"
    );

    frame
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

fn draw_separator(frame: &mut Frame, sep: &SeparatorRow, input: &RenderInput<'_>) {
    let m = input.metrics;
    let geometry = &input.layout.geometry;
    frame.push(DrawCmd::Text {
        text: sep.label,
        baseline: Point::new(sep.label_x, sep.y + m.label_baseline),
        color: palette::LABEL,
    });

    let line_y = sep.y + m.rule_offset_y;
    let start_x = sep.label_x + m.label_rule_gap;
    let end_x = geometry.content_offset_x + geometry.content_width - m.scrollbar_gap;
    // Narrow viewports leave no room for the rule.
    if end_x > start_x {
        frame.push(DrawCmd::Line {
            from: Point::new(start_x, line_y),
            to: Point::new(end_x, line_y),
            color: palette::RULE,
            width: 1.0,
        });
    }
}

fn draw_grid(frame: &mut Frame, grid: &GridRow, input: &RenderInput<'_>) {
    for item in &grid.items {
        let origin = input
            .positions
            .get(&item.note.id)
            .copied()
            .unwrap_or_else(|| item.rect.origin());
        let rect = item.rect.with_origin(origin);
        draw_note(frame, item.note, rect, false, input);
        if input.edit_mode {
            draw_ants(frame, rect, input);
        }
    }

    if let Some(slot) = grid.placeholder {
        frame.push(DrawCmd::DashedRoundRect {
            rect: slot,
            radius: input.metrics.corner_radius,
            color: palette::ANTS,
            width: input.style.ants_width,
            dash: input.style.ants_dash,
            offset: 0.0,
        });
    }

    let hovered = matches!(
        input.hover,
        Some(HitTarget::AddNote { section, .. }) if section == grid.section
    );
    draw_add_control(frame, grid.add_note, hovered, input);
}

fn draw_note(frame: &mut Frame, note: Note, rect: Rect, ghost: bool, input: &RenderInput<'_>) {
    let (fill, ring) = palette::tone_colors(note.tone);
    frame.push(DrawCmd::NoteMarker {
        id: note.id,
        rect,
        ghost,
    });
    frame.push(DrawCmd::RoundRect {
        rect,
        radius: corner(rect, input.metrics.corner_radius),
        fill: Some(fill),
        stroke: Some((ring, 1.0)),
    });
}

fn draw_ants(frame: &mut Frame, rect: Rect, input: &RenderInput<'_>) {
    let style = input.style;
    let path = rect.outset(style.ants_outset);
    frame.push(DrawCmd::DashedRoundRect {
        rect: path,
        radius: corner(path, input.metrics.corner_radius + style.ants_outset),
        color: palette::ANTS,
        width: style.ants_width,
        dash: style.ants_dash,
        offset: -input.ants_offset,
    });
}

/// Transparent tile with a circled plus; shaded while hovered.
fn draw_add_control(frame: &mut Frame, rect: Rect, hovered: bool, input: &RenderInput<'_>) {
    let style = input.style;
    if hovered {
        frame.push(DrawCmd::RoundRect {
            rect,
            radius: corner(rect, input.metrics.corner_radius),
            fill: Some(palette::CONTROL_HOVER_FILL),
            stroke: None,
        });
    }
    let c = rect.center();
    frame.push(DrawCmd::Circle {
        center: c,
        radius: style.add_circle_radius,
        color: palette::CONTROL_OUTLINE,
        width: style.add_circle_stroke,
    });
    let arm = style.add_glyph_half;
    plus_stroke(frame, c, arm, palette::CONTROL_GLYPH, style.add_glyph_stroke);
}

fn plus_stroke(frame: &mut Frame, c: Point, arm: f64, color: Rgba, width: f64) {
    frame.push(DrawCmd::Line {
        from: Point::new(c.x - arm, c.y),
        to: Point::new(c.x + arm, c.y),
        color,
        width,
    });
    frame.push(DrawCmd::Line {
        from: Point::new(c.x, c.y - arm),
        to: Point::new(c.x, c.y + arm),
        color,
        width,
    });
}

fn draw_ghost(frame: &mut Frame, ghost: DragGhost, input: &RenderInput<'_>) {
    let style = input.style;
    let rect = ghost.rect.scaled(style.drag_scale);
    frame.push(DrawCmd::Shadow {
        rect,
        radius: corner(rect, input.metrics.corner_radius * style.drag_scale),
        blur: style.shadow_blur,
        offset: style.shadow_offset,
        color: palette::SHADOW,
    });
    draw_note(frame, ghost.note, rect, true, input);
}

/// Corner radius clamped to half the shorter side.
#[inline]
fn corner(rect: Rect, radius: f64) -> f64 {
    radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0)
}
