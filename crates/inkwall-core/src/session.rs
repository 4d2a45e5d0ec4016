//! Drawing session: the single owner of all engine state.
//!
//! There is no ambient drawing context. `DrawingSession` owns the surface,
//! tool state, input tracker, history stack and viewport gate, and is the
//! only public mutation entry point.

use kurbo::Point;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::device::DeviceClassifier;
use crate::events::{AnalyticsEvent, AnalyticsSink, NullSink};
use crate::history::HistoryStack;
use crate::input::{InputTracker, Segment};
use crate::surface::{CompositeRule, RestoreError, Snapshot, Surface, SurfaceError};
use crate::tools::{ToolKind, ToolState, composite_for};
use crate::viewport::{GateNotice, ViewportGate};

/// One user's drawing session.
pub struct DrawingSession {
    id: Uuid,
    config: EngineConfig,
    surface: Surface,
    tools: ToolState,
    tracker: InputTracker,
    history: HistoryStack,
    gate: ViewportGate,
    sink: Box<dyn AnalyticsSink>,
}

impl DrawingSession {
    /// Create a session with a surface matching the initial viewport.
    pub fn new(
        width: u32,
        height: u32,
        classifier: &dyn DeviceClassifier,
        config: EngineConfig,
    ) -> Result<Self, SurfaceError> {
        let surface = Surface::new(width, height)?;
        let gate = ViewportGate::new(
            classifier,
            config.fullscreen_min_width,
            config.fullscreen_min_height,
            width,
            height,
        );
        let history = HistoryStack::new(config.history_cap);
        let tools = ToolState::new(config.default_brush_width as i32, config.eraser_mode);
        let id = Uuid::new_v4();
        log::info!("drawing session {id} started at {width}x{height}, {:?}", gate.mode());
        Ok(Self {
            id,
            config,
            surface,
            tools,
            tracker: InputTracker::new(),
            history,
            gate,
            sink: Box::new(NullSink),
        })
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Route analytics events to the given sink.
    pub fn set_analytics_sink(&mut self, sink: Box<dyn AnalyticsSink>) {
        self.sink = sink;
    }

    /// Emit an analytics event through the session's sink.
    pub fn emit(&self, event: &AnalyticsEvent) {
        self.sink.record(event);
    }

    /// Set the canvas's on-screen origin used for coordinate mapping.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.tracker.set_origin(origin);
    }

    /// Pointer pressed: begin a stroke.
    ///
    /// Denied silently while the viewport gate blocks input. A press while
    /// a stroke is still active is an implicit end-then-start.
    pub fn pointer_down(&mut self, client: Point) {
        if !self.gate.allows_input() {
            log::debug!("stroke start denied by viewport gate ({:?})", self.gate.mode());
            return;
        }
        if self.tracker.is_active() {
            self.tracker.finish();
        }
        self.history.record_before_mutation(&mut self.surface);
        let local = self.tracker.client_to_local(client);
        let tool = self.tools.tool();
        let width = self.tools.brush_width();
        self.tracker.begin(local, tool, width);
        self.sink.record(&AnalyticsEvent::DrawingStarted {
            tool,
            brush_size: width,
        });
    }

    /// Pointer moved: extend the active stroke and render the new segment.
    pub fn pointer_move(&mut self, client: Point) {
        let local = self.tracker.client_to_local(client);
        if let Some(segment) = self.tracker.extend(local) {
            self.render_segment(segment);
        }
    }

    /// Pointer released: finalize the active stroke.
    pub fn pointer_up(&mut self) {
        if let Some(stroke) = self.tracker.finish() {
            log::debug!("stroke finished with {} points", stroke.points.len());
        }
    }

    /// Pointer left the canvas: discard drawing-in-progress state.
    pub fn pointer_leave(&mut self) {
        self.tracker.abort();
    }

    fn render_segment(&mut self, segment: Segment) {
        let rule = composite_for(segment.tool, self.config.eraser_mode);
        let ink = match (segment.tool, rule) {
            (_, CompositeRule::DestinationOut) => [0, 0, 0, 0],
            (ToolKind::Eraser, CompositeRule::SourceOver) => self.config.background,
            (ToolKind::Pencil, CompositeRule::SourceOver) => self.config.foreground,
        };
        self.surface
            .stroke_segment(segment.from, segment.to, segment.width, rule, ink);
    }

    /// Select a tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let previous = self.tools.tool();
        self.tools.set_tool(tool);
        self.sink
            .record(&AnalyticsEvent::ToolChanged { tool, previous });
    }

    /// Set the brush width; out-of-range input is silently clamped.
    pub fn set_brush_width(&mut self, width: i32) {
        self.tools.set_brush_width(width);
        self.sink.record(&AnalyticsEvent::BrushSizeChanged {
            size: self.tools.brush_width(),
        });
    }

    /// Undo the most recent stroke; no-op on an empty stack.
    pub fn undo(&mut self) -> Result<bool, RestoreError> {
        let applied = self.history.undo(&mut self.surface)?;
        if applied {
            self.sink.record(&AnalyticsEvent::UndoUsed);
        }
        Ok(applied)
    }

    /// Redo the most recently undone stroke; no-op on an empty stack.
    pub fn redo(&mut self) -> Result<bool, RestoreError> {
        let applied = self.history.redo(&mut self.surface)?;
        if applied {
            self.sink.record(&AnalyticsEvent::RedoUsed);
        }
        Ok(applied)
    }

    /// Blank the canvas and drop all history.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.history.clear();
        self.sink.record(&AnalyticsEvent::CanvasCleared);
    }

    /// Window dimensions changed; the viewport gate keeps the surface in
    /// step and preserves or restores content across threshold crossings.
    pub fn handle_resize(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<Option<GateNotice>, SurfaceError> {
        self.gate
            .handle_resize(width, height, &mut self.surface, &mut self.history)
    }

    /// Point-in-time copy of the raster for the export boundary.
    ///
    /// The returned snapshot owns its pixels, so strokes drawn while an
    /// upload is in flight can never corrupt the exported bytes.
    pub fn finalize_raster(&mut self) -> Snapshot {
        self.surface.snapshot()
    }

    /// Read access to the surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Read access to the history stacks.
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Read access to the viewport gate.
    pub fn gate(&self) -> &ViewportGate {
        &self.gate
    }

    /// Read access to the tool state.
    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::FixedClassifier;
    use crate::events::MemorySink;
    use crate::viewport::ViewportMode;
    use std::rc::Rc;

    fn desktop_session(width: u32, height: u32) -> DrawingSession {
        DrawingSession::new(width, height, &FixedClassifier(false), EngineConfig::default())
            .unwrap()
    }

    fn is_blank(session: &DrawingSession) -> bool {
        session.surface().pixels().iter().all(|&b| b == 0)
    }

    /// A short three-point stroke around `(x, y)`.
    fn draw_stroke(session: &mut DrawingSession, x: f64, y: f64) {
        session.pointer_down(Point::new(x, y));
        session.pointer_move(Point::new(x + 20.0, y + 5.0));
        session.pointer_move(Point::new(x + 40.0, y));
        session.pointer_up();
    }

    #[test]
    fn test_n_strokes_undo_to_blank() {
        let mut session = desktop_session(900, 700);
        for i in 0..3 {
            draw_stroke(&mut session, 100.0 + f64::from(i) * 120.0, 200.5);
        }
        assert!(!is_blank(&session));

        for _ in 0..3 {
            assert!(session.undo().unwrap());
        }
        assert!(is_blank(&session));
        assert!(!session.undo().unwrap());
    }

    #[test]
    fn test_redo_reproduces_pixels_exactly() {
        let mut session = desktop_session(900, 700);
        draw_stroke(&mut session, 150.0, 150.5);
        draw_stroke(&mut session, 400.0, 300.5);
        let final_pixels = session.surface().pixels().to_vec();

        session.undo().unwrap();
        session.undo().unwrap();
        session.redo().unwrap();
        session.redo().unwrap();
        assert_eq!(session.surface().pixels(), &final_pixels[..]);
    }

    #[test]
    fn test_two_stroke_undo_redo_scenario() {
        let mut session = desktop_session(900, 700);
        draw_stroke(&mut session, 150.0, 150.5);
        let only_a = session.surface().pixels().to_vec();
        draw_stroke(&mut session, 500.0, 400.5);
        let a_and_b = session.surface().pixels().to_vec();
        assert_ne!(only_a, a_and_b);

        session.undo().unwrap();
        assert_eq!(session.surface().pixels(), &only_a[..]);

        session.redo().unwrap();
        assert_eq!(session.surface().pixels(), &a_and_b[..]);
    }

    #[test]
    fn test_new_stroke_clears_redo() {
        let mut session = desktop_session(900, 700);
        draw_stroke(&mut session, 150.0, 150.5);
        session.undo().unwrap();
        assert!(session.history().can_redo());

        draw_stroke(&mut session, 300.0, 300.5);
        assert!(!session.history().can_redo());
        assert!(!session.redo().unwrap());
    }

    #[test]
    fn test_clear_resets_canvas_and_history() {
        let mut session = desktop_session(900, 700);
        draw_stroke(&mut session, 150.0, 150.5);
        session.clear();

        assert!(is_blank(&session));
        assert!(!session.history().can_undo());
        assert!(!session.history().can_redo());
        assert!(!session.history().has_content());
    }

    #[test]
    fn test_brush_width_clamping_via_session() {
        let mut session = desktop_session(900, 700);
        session.set_brush_width(0);
        assert_eq!(session.tool_state().brush_width(), 1);
        session.set_brush_width(-5);
        assert_eq!(session.tool_state().brush_width(), 1);
        session.set_brush_width(25);
        assert_eq!(session.tool_state().brush_width(), 20);
    }

    #[test]
    fn test_eraser_removes_pencil_marks() {
        let mut session = desktop_session(900, 700);
        draw_stroke(&mut session, 150.0, 150.5);

        session.set_tool(ToolKind::Eraser);
        session.set_brush_width(20);
        // Scrub the stroke's bounding area.
        for row in 0..5 {
            let y = 135.5 + f64::from(row) * 10.0;
            session.pointer_down(Point::new(130.0, y));
            session.pointer_move(Point::new(210.0, y));
            session.pointer_up();
        }
        assert!(is_blank(&session));
    }

    #[test]
    fn test_press_without_move_paints_nothing_but_snapshots() {
        let mut session = desktop_session(900, 700);
        session.pointer_down(Point::new(100.0, 100.0));
        session.pointer_up();

        assert!(is_blank(&session));
        assert!(session.history().can_undo());
        assert!(session.history().has_content());
    }

    #[test]
    fn test_pointer_leave_ends_stroke() {
        let mut session = desktop_session(900, 700);
        session.pointer_down(Point::new(100.0, 100.5));
        session.pointer_move(Point::new(140.0, 100.5));
        session.pointer_leave();

        let before = session.surface().pixels().to_vec();
        // Moves after the leave must not paint.
        session.pointer_move(Point::new(400.0, 400.5));
        assert_eq!(session.surface().pixels(), &before[..]);
    }

    #[test]
    fn test_implicit_end_then_start() {
        let mut session = desktop_session(900, 700);
        session.pointer_down(Point::new(100.0, 100.5));
        session.pointer_move(Point::new(140.0, 100.5));
        // Second press without a release: starts a fresh stroke.
        session.pointer_down(Point::new(300.0, 300.5));
        session.pointer_move(Point::new(340.0, 300.5));
        session.pointer_up();

        assert_eq!(session.history().undo_depth(), 2);
    }

    #[test]
    fn test_canvas_origin_mapping() {
        let mut session = desktop_session(900, 700);
        session.set_canvas_origin(Point::new(50.0, 80.0));
        session.pointer_down(Point::new(150.5, 180.5));
        session.pointer_move(Point::new(170.5, 180.5));
        session.pointer_up();

        // Painted around local (100..120, 100), not at the client position.
        let w = session.surface().width() as usize;
        let idx = |x: usize, y: usize| (y * w + x) * 4;
        let pixels = session.surface().pixels();
        assert_ne!(pixels[idx(110, 100) + 3], 0);
        assert_eq!(pixels[idx(160, 180) + 3], 0);
    }

    #[test]
    fn test_fullscreen_shrink_grow_scenario() {
        let mut session = desktop_session(900, 700);
        draw_stroke(&mut session, 200.0, 200.5);
        let full_pixels = session.surface().pixels().to_vec();
        let full_depth = session.history().undo_depth();

        let notice = session.handle_resize(700, 500).unwrap();
        assert_eq!(notice, Some(GateNotice::ContentPreserved));
        assert!(session.gate().has_preserved());

        // Input is disabled while constrained.
        session.pointer_down(Point::new(100.0, 100.0));
        session.pointer_move(Point::new(200.0, 100.0));
        session.pointer_up();
        assert_eq!(session.history().undo_depth(), 0);

        let notice = session.handle_resize(900, 700).unwrap();
        assert_eq!(notice, Some(GateNotice::ContentRestored));
        assert_eq!(session.surface().pixels(), &full_pixels[..]);
        assert_eq!(session.history().undo_depth(), full_depth);
        assert!(session.undo().unwrap());
    }

    #[test]
    fn test_mobile_device_never_draws() {
        let mut session = DrawingSession::new(
            1920,
            1080,
            &FixedClassifier(true),
            EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(session.gate().mode(), ViewportMode::ConstrainedMobile);

        draw_stroke(&mut session, 300.0, 300.5);
        assert!(is_blank(&session));
        assert!(!session.history().can_undo());

        // Window size never promotes a mobile device.
        session.handle_resize(2560, 1440).unwrap();
        assert_eq!(session.gate().mode(), ViewportMode::ConstrainedMobile);
    }

    #[test]
    fn test_analytics_events_emitted() {
        let sink = Rc::new(MemorySink::new());
        let mut session = desktop_session(900, 700);
        session.set_analytics_sink(Box::new(Rc::clone(&sink)));

        session.set_tool(ToolKind::Eraser);
        session.set_brush_width(9);
        session.pointer_down(Point::new(100.0, 100.5));
        session.pointer_move(Point::new(150.0, 100.5));
        session.pointer_up();
        session.undo().unwrap();
        session.redo().unwrap();
        session.clear();

        assert_eq!(
            sink.events(),
            vec![
                AnalyticsEvent::ToolChanged {
                    tool: ToolKind::Eraser,
                    previous: ToolKind::Pencil,
                },
                AnalyticsEvent::BrushSizeChanged { size: 9 },
                AnalyticsEvent::DrawingStarted {
                    tool: ToolKind::Eraser,
                    brush_size: 9,
                },
                AnalyticsEvent::UndoUsed,
                AnalyticsEvent::RedoUsed,
                AnalyticsEvent::CanvasCleared,
            ]
        );
    }

    #[test]
    fn test_denied_pointer_down_emits_nothing() {
        let sink = Rc::new(MemorySink::new());
        let mut session = DrawingSession::new(
            640,
            480,
            &FixedClassifier(false),
            EngineConfig::default(),
        )
        .unwrap();
        session.set_analytics_sink(Box::new(Rc::clone(&sink)));
        assert_eq!(session.gate().mode(), ViewportMode::ConstrainedDesktop);

        session.pointer_down(Point::new(10.0, 10.0));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_background_paint_eraser_leaves_opaque_pixels() {
        let mut config = EngineConfig::default();
        config.eraser_mode = crate::tools::EraserMode::BackgroundPaint;
        let mut session =
            DrawingSession::new(900, 700, &FixedClassifier(false), config).unwrap();

        draw_stroke(&mut session, 150.0, 150.5);
        session.set_tool(ToolKind::Eraser);
        session.set_brush_width(20);
        session.pointer_down(Point::new(145.0, 150.5));
        session.pointer_move(Point::new(200.0, 150.5));
        session.pointer_up();

        // Erased pixels are opaque white, not transparent.
        let w = session.surface().width() as usize;
        let idx = (150 * w + 160) * 4;
        assert_eq!(&session.surface().pixels()[idx..idx + 4], &[255, 255, 255, 255]);
    }
}
