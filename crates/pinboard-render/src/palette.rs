#![forbid(unsafe_code)]

//! Colors used by the board renderer.

use pinboard_core::model::Tone;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 0xFF,
        }
    }

    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb` or `#rrggbbaa` when translucent.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Separator label text (neutral-500).
pub const LABEL: Rgba = Rgba::hex(0x6b7280);
/// Separator rule (neutral-300).
pub const RULE: Rgba = Rgba::hex(0xd4d4d4);
/// Add control tile shading while hovered (neutral-200, ~60%).
pub const CONTROL_HOVER_FILL: Rgba = Rgba::hex(0xe5e7eb).with_alpha(153);
/// Add control circle outline (neutral-400).
pub const CONTROL_OUTLINE: Rgba = Rgba::hex(0x9ca3af);
/// Add control plus glyph.
pub const CONTROL_GLYPH: Rgba = Rgba::hex(0x6e7c8f);
/// Marching-ants stroke and drop placeholder outline.
pub const ANTS: Rgba = Rgba::hex(0xd1d5db);
/// Drag ghost shadow.
pub const SHADOW: Rgba = Rgba::hex(0x000000).with_alpha(56);

/// `(fill, ring)` colors for a note tone, slightly dimmed.
#[must_use]
pub const fn tone_colors(tone: Tone) -> (Rgba, Rgba) {
    match tone {
        Tone::Yellow => (Rgba::hex(0xfde68a), Rgba::hex(0xf5d35a)),
        Tone::Sky => (Rgba::hex(0xb6e0fb), Rgba::hex(0x74c9f8)),
        Tone::Emerald => (Rgba::hex(0xa1f0cc), Rgba::hex(0x66e3b3)),
        Tone::Amber => (Rgba::hex(0xf5cc55), Rgba::hex(0xe69a0a)),
        Tone::Rose => (Rgba::hex(0xf9c6ce), Rgba::hex(0xf395a2)),
        Tone::Violet => (Rgba::hex(0xd8d0fd), Rgba::hex(0xbdaafc)),
        Tone::Lime => (Rgba::hex(0xd4f493), Rgba::hex(0xb9ee5a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_css_round_trip() {
        assert_eq!(Rgba::hex(0xfde68a).to_css(), "#fde68a");
        assert_eq!(CONTROL_HOVER_FILL.to_css(), "#e5e7eb99");
    }

    #[test]
    fn every_tone_has_distinct_fill() {
        let mut fills: Vec<Rgba> = Tone::ALL.iter().map(|&t| tone_colors(t).0).collect();
        fills.sort_by_key(|c| (c.r, c.g, c.b));
        fills.dedup();
        assert_eq!(fills.len(), Tone::ALL.len());
    }
}
