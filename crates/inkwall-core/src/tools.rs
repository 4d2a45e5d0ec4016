//! Tool and brush state.

use serde::{Deserialize, Serialize};

use crate::surface::CompositeRule;

/// Smallest allowed brush width, in pixels.
pub const MIN_BRUSH_WIDTH: u32 = 1;
/// Largest allowed brush width, in pixels.
pub const MAX_BRUSH_WIDTH: u32 = 20;
/// Brush width a fresh session starts with.
pub const DEFAULT_BRUSH_WIDTH: u32 = 4;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
}

/// What the eraser does to covered pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EraserMode {
    /// True alpha-erasure; lossless with respect to underlying content.
    #[default]
    Transparent,
    /// Paint the configured background color over covered pixels.
    BackgroundPaint,
}

/// Compositing rule implied by a tool under the given eraser mode.
pub fn composite_for(tool: ToolKind, eraser_mode: EraserMode) -> CompositeRule {
    match tool {
        ToolKind::Pencil => CompositeRule::SourceOver,
        ToolKind::Eraser => match eraser_mode {
            EraserMode::Transparent => CompositeRule::DestinationOut,
            EraserMode::BackgroundPaint => CompositeRule::SourceOver,
        },
    }
}

/// Current tool selection and brush parameters.
#[derive(Debug, Clone)]
pub struct ToolState {
    tool: ToolKind,
    brush_width: u32,
    eraser_mode: EraserMode,
}

impl ToolState {
    /// Create tool state with the given starting brush width and eraser mode.
    ///
    /// The starting width is clamped like any other width input.
    pub fn new(brush_width: i32, eraser_mode: EraserMode) -> Self {
        let mut state = Self {
            tool: ToolKind::default(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            eraser_mode,
        };
        state.set_brush_width(brush_width);
        state
    }

    /// Currently selected tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Select a tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Current brush width in pixels.
    pub fn brush_width(&self) -> u32 {
        self.brush_width
    }

    /// Set the brush width, silently clamping out-of-range input to
    /// `[MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH]`.
    pub fn set_brush_width(&mut self, width: i32) {
        self.brush_width = width.clamp(MIN_BRUSH_WIDTH as i32, MAX_BRUSH_WIDTH as i32) as u32;
    }

    /// Eraser behavior configured for this session.
    pub fn eraser_mode(&self) -> EraserMode {
        self.eraser_mode
    }

    /// Compositing rule implied by the current tool.
    pub fn composite_rule(&self) -> CompositeRule {
        composite_for(self.tool, self.eraser_mode)
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(DEFAULT_BRUSH_WIDTH as i32, EraserMode::default())
    }
}
