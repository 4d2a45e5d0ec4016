//! Engine configuration.

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_CAP;
use crate::tools::{DEFAULT_BRUSH_WIDTH, EraserMode};

/// Minimum viewport width for drawing, in pixels.
pub const DEFAULT_FULLSCREEN_MIN_WIDTH: u32 = 800;
/// Minimum viewport height for drawing, in pixels.
pub const DEFAULT_FULLSCREEN_MIN_HEIGHT: u32 = 600;

/// Session-wide engine settings.
///
/// Colors are stored as RGBA8 components so the config stays trivially
/// serializable; use the accessors for typed colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ink color for the pencil tool.
    pub foreground: [u8; 4],
    /// Background color, painted by the eraser in `BackgroundPaint` mode.
    pub background: [u8; 4],
    /// Brush width a fresh session starts with.
    pub default_brush_width: u32,
    /// Eraser behavior; see the open-question discussion in DESIGN.md.
    pub eraser_mode: EraserMode,
    /// Maximum retained undo snapshots.
    pub history_cap: usize,
    /// Fullscreen classification thresholds.
    pub fullscreen_min_width: u32,
    pub fullscreen_min_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            foreground: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
            default_brush_width: DEFAULT_BRUSH_WIDTH,
            eraser_mode: EraserMode::default(),
            history_cap: DEFAULT_HISTORY_CAP,
            fullscreen_min_width: DEFAULT_FULLSCREEN_MIN_WIDTH,
            fullscreen_min_height: DEFAULT_FULLSCREEN_MIN_HEIGHT,
        }
    }
}

impl EngineConfig {
    /// Pencil ink as a typed color.
    pub fn foreground_color(&self) -> Color {
        let [r, g, b, a] = self.foreground;
        Color::from_rgba8(r, g, b, a)
    }

    /// Background as a typed color.
    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        Color::from_rgba8(r, g, b, a)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from JSON; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
