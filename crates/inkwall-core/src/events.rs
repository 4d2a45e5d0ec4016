//! Analytics event vocabulary and sinks.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::tools::ToolKind;

/// Discrete interaction events emitted by the drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    ToolChanged { tool: ToolKind, previous: ToolKind },
    BrushSizeChanged { size: u32 },
    UndoUsed,
    RedoUsed,
    CanvasCleared,
    DrawingStarted { tool: ToolKind, brush_size: u32 },
    SaveClicked,
    SubmissionResult { accepted: bool },
}

/// Collector for analytics events.
///
/// Emission is fire-and-forget: implementations must neither block nor fail
/// the interaction they annotate, and swallow their own errors.
pub trait AnalyticsSink {
    fn record(&self, event: &AnalyticsEvent);
}

impl<S: AnalyticsSink> AnalyticsSink for Rc<S> {
    fn record(&self, event: &AnalyticsEvent) {
        (**self).record(event);
    }
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn record(&self, _event: &AnalyticsEvent) {}
}

/// Writes events to the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn record(&self, event: &AnalyticsEvent) {
        log::debug!("analytics event: {event:?}");
    }
}

/// Buffers events in memory, for tests and offline batching.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&self, event: &AnalyticsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
