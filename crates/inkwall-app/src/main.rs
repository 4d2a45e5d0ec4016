//! Headless demo entry point.
//!
//! Draws a scripted figure, exercises undo/redo, and writes the exported
//! PNG next to the working directory. Useful for smoke-testing the engine
//! without any UI attached.

use inkwall_app::encode_png;
use inkwall_core::{DrawingSession, EngineConfig, FixedClassifier, LogSink, ToolKind};
use kurbo::Point;

fn main() {
    env_logger::init();
    log::info!("starting inkwall demo session");

    let mut session = match DrawingSession::new(
        900,
        700,
        &FixedClassifier(false),
        EngineConfig::default(),
    ) {
        Ok(session) => session,
        Err(err) => {
            log::error!("failed to create session: {err}");
            std::process::exit(1);
        }
    };
    session.set_analytics_sink(Box::new(LogSink));

    // A zig-zag pencil stroke.
    session.set_brush_width(6);
    session.pointer_down(Point::new(120.0, 350.0));
    for i in 1..=12 {
        let x = 120.0 + f64::from(i) * 55.0;
        let y = if i % 2 == 0 { 350.0 } else { 250.0 };
        session.pointer_move(Point::new(x, y));
    }
    session.pointer_up();

    // Erase a window out of the middle, then take it back.
    session.set_tool(ToolKind::Eraser);
    session.set_brush_width(18);
    session.pointer_down(Point::new(380.0, 240.0));
    session.pointer_move(Point::new(520.0, 360.0));
    session.pointer_up();
    if let Err(err) = session.undo() {
        log::error!("undo failed: {err}");
    }

    let raster = session.finalize_raster();
    match encode_png(&raster) {
        Ok(bytes) => {
            let path = "inkwall-demo.png";
            if let Err(err) = std::fs::write(path, &bytes) {
                log::error!("could not write {path}: {err}");
                std::process::exit(1);
            }
            log::info!("wrote {path} ({} bytes)", bytes.len());
        }
        Err(err) => {
            log::error!("export failed: {err}");
            std::process::exit(1);
        }
    }
}
