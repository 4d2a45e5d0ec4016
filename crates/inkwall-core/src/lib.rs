//! Inkwall Core Library
//!
//! Platform-agnostic raster drawing engine for the inkwall canvas:
//! pixel-buffer surface, pencil/eraser tooling, stroke capture, bounded
//! snapshot undo/redo, and viewport-gated canvas lifecycle.

pub mod config;
pub mod device;
pub mod events;
pub mod history;
pub mod input;
pub mod session;
pub mod surface;
pub mod tools;
pub mod viewport;

pub use config::EngineConfig;
pub use device::{DeviceClassifier, FixedClassifier, UserAgentClassifier};
pub use events::{AnalyticsEvent, AnalyticsSink, LogSink, MemorySink, NullSink};
pub use history::{DEFAULT_HISTORY_CAP, HistoryStack};
pub use input::{InputTracker, Segment, Stroke};
pub use session::DrawingSession;
pub use surface::{CompositeRule, RestoreError, Snapshot, Surface, SurfaceError};
pub use tools::{
    DEFAULT_BRUSH_WIDTH, EraserMode, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH, ToolKind, ToolState,
};
pub use viewport::{GateNotice, ViewportGate, ViewportMode};
