#![forbid(unsafe_code)]

//! Canvas configuration as data.
//!
//! Every tunable of the canvas lives in one [`CanvasConfig`] that can be
//! loaded from TOML or JSON at startup (feature `config`). Missing keys fall
//! back to the defaults, so a file only needs to name what it changes.
//!
//! ```toml
//! [interaction]
//! arming_delay_ms = 150
//!
//! [animation]
//! smoothing = 0.25
//!
//! [metrics]
//! tile = 160.0
//! ```
//!
//! ```rust,ignore
//! let config = CanvasConfig::from_toml_file("pinboard.toml")?;
//! ```
//!
//! Loaders validate after parsing and report every problem at once through
//! [`ConfigError::Validation`].

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use pinboard_layout::LayoutMetrics;
use pinboard_render::RenderStyle;
use web_time::Duration;

// ---------------------------------------------------------------------------
// Top-level CanvasConfig
// ---------------------------------------------------------------------------

/// All canvas tunables.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CanvasConfig {
    /// Layout geometry.
    pub metrics: LayoutMetrics,
    /// Pointer interaction timing.
    pub interaction: InteractionConfig,
    /// Tile motion and marching ants.
    pub animation: AnimationConfig,
    /// Renderer knobs.
    pub render: RenderConfig,
}

impl CanvasConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all values, returning a list of problems. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.metrics.validate();

        let a = &self.animation;
        if !(a.smoothing > 0.0 && a.smoothing <= 1.0) {
            errors.push(format!(
                "animation.smoothing must be in (0, 1], got {}",
                a.smoothing
            ));
        }
        if !(a.snap_epsilon.is_finite() && a.snap_epsilon >= 0.0) {
            errors.push(format!(
                "animation.snap_epsilon must be >= 0, got {}",
                a.snap_epsilon
            ));
        }
        if !(a.ants_speed.is_finite() && a.ants_speed >= 0.0) {
            errors.push(format!(
                "animation.ants_speed must be >= 0, got {}",
                a.ants_speed
            ));
        }

        let r = &self.render;
        if !(r.cull_margin.is_finite() && r.cull_margin >= 0.0) {
            errors.push(format!(
                "render.cull_margin must be >= 0, got {}",
                r.cull_margin
            ));
        }
        if !(r.drag_scale.is_finite() && r.drag_scale > 0.0) {
            errors.push(format!(
                "render.drag_scale must be > 0, got {}",
                r.drag_scale
            ));
        }

        errors
    }

    /// `self` if valid, otherwise every validation problem.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Renderer style derived from this config.
    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            cull_margin: self.render.cull_margin,
            drag_scale: self.render.drag_scale,
            ..RenderStyle::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InteractionConfig {
    /// Hold time before a pressed note starts dragging (default: 200).
    pub arming_delay_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            arming_delay_ms: 200,
        }
    }
}

impl InteractionConfig {
    #[must_use]
    pub fn arming_delay(&self) -> Duration {
        Duration::from_millis(self.arming_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AnimationConfig {
    /// Fraction of the remaining distance covered per frame (default: 0.2).
    pub smoothing: f64,
    /// Distance under which a tile snaps to its target (default: 0.5).
    pub snap_epsilon: f64,
    /// Marching-ants dash advance per frame (default: 0.35).
    pub ants_speed: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.2,
            snap_epsilon: 0.5,
            ants_speed: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RenderConfig {
    /// Extra painted distance above and below the viewport (default: 200).
    pub cull_margin: f64,
    /// Drag ghost scale (default: 1.04).
    pub drag_scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cull_margin: 200.0,
            drag_scale: 1.04,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a canvas configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
