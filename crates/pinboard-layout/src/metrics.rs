#![forbid(unsafe_code)]

//! Layout metrics: the single source of truth for board geometry.

/// Geometry constants for the board canvas, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutMetrics {
    /// Side of a square note tile.
    pub tile: f64,
    /// Gap between adjacent tiles, horizontally and vertically.
    pub gutter: f64,
    /// Vertical gap after each section's grid.
    pub row_gap: f64,
    /// Height of a section separator.
    pub separator_height: f64,
    /// Tile corner radius.
    pub corner_radius: f64,
    /// Content width cap; wider viewports center the content.
    pub content_max_width: f64,
    /// Horizontal padding inside the content area, each side.
    pub content_pad_x: f64,
    /// Space above the first row.
    pub top_pad: f64,
    /// Space below the add-row control.
    pub bottom_pad: f64,
    /// Separator rules stop this far from the right content edge.
    pub scrollbar_gap: f64,
    /// Label baseline, measured from the separator top.
    pub label_baseline: f64,
    /// Rule line position, measured from the separator top.
    pub rule_offset_y: f64,
    /// Horizontal distance from label start to rule start.
    pub label_rule_gap: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            tile: 180.0,
            gutter: 16.0,
            row_gap: 28.0,
            separator_height: 28.0,
            corner_radius: 8.0,
            content_max_width: 1600.0,
            content_pad_x: 24.0,
            top_pad: 10.0,
            bottom_pad: 24.0,
            scrollbar_gap: 12.0,
            label_baseline: 14.0,
            rule_offset_y: 12.0,
            label_rule_gap: 84.0,
        }
    }
}

impl LayoutMetrics {
    /// Distance between the left edges of horizontally adjacent tiles.
    #[inline]
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.tile + self.gutter
    }

    /// Validate all values, returning a list of problems. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.tile.is_finite() && self.tile > 0.0) {
            errors.push(format!("metrics.tile must be > 0, got {}", self.tile));
        }
        if !self.content_max_width.is_finite() || self.content_max_width <= 0.0 {
            errors.push(format!(
                "metrics.content_max_width must be > 0, got {}",
                self.content_max_width
            ));
        }
        let non_negative = [
            ("gutter", self.gutter),
            ("row_gap", self.row_gap),
            ("separator_height", self.separator_height),
            ("corner_radius", self.corner_radius),
            ("content_pad_x", self.content_pad_x),
            ("top_pad", self.top_pad),
            ("bottom_pad", self.bottom_pad),
            ("scrollbar_gap", self.scrollbar_gap),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("metrics.{name} must be >= 0, got {value}"));
            }
        }
        errors
    }
}
