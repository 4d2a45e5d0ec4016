//! Pointer input tracking and stroke lifecycle.

use kurbo::Point;

use crate::tools::ToolKind;

/// A continuous pointer path from press to release, rendered with the tool
/// parameters active when it began.
#[derive(Debug, Clone)]
pub struct Stroke {
    /// Canvas-local points, in arrival order.
    pub points: Vec<Point>,
    /// Tool captured at stroke start.
    pub tool: ToolKind,
    /// Brush width captured at stroke start.
    pub width: u32,
}

/// One segment of the active stroke, ready to render.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub tool: ToolKind,
    pub width: u32,
}

/// Converts pointer events into canvas-local coordinates and drives the
/// begin/extend/end lifecycle of the single active stroke.
#[derive(Debug)]
pub struct InputTracker {
    /// Canvas on-screen origin, in client coordinates.
    origin: Point,
    active: Option<Stroke>,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            active: None,
        }
    }
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas's on-screen origin offset.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Map a client-coordinate point to canvas-local coordinates.
    pub fn client_to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.origin.x, client.y - self.origin.y)
    }

    /// Whether a stroke is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a new stroke at a canvas-local point.
    pub fn begin(&mut self, local: Point, tool: ToolKind, width: u32) {
        self.active = Some(Stroke {
            points: vec![local],
            tool,
            width,
        });
    }

    /// Append a canvas-local point to the active stroke.
    ///
    /// Returns the segment from the previous point, or `None` when no
    /// stroke is active.
    pub fn extend(&mut self, local: Point) -> Option<Segment> {
        let stroke = self.active.as_mut()?;
        let from = *stroke.points.last()?;
        stroke.points.push(local);
        Some(Segment {
            from,
            to: local,
            tool: stroke.tool,
            width: stroke.width,
        })
    }

    /// Finalize the active stroke, returning it.
    pub fn finish(&mut self) -> Option<Stroke> {
        self.active.take()
    }

    /// Discard the active stroke (pointer left the canvas).
    pub fn abort(&mut self) {
        if self.active.take().is_some() {
            log::debug!("active stroke aborted");
        }
    }
}
