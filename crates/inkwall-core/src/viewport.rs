//! Viewport gating and cross-transition content preservation.

use serde::{Deserialize, Serialize};

use crate::device::DeviceClassifier;
use crate::history::HistoryStack;
use crate::surface::{Snapshot, Surface, SurfaceError};

/// Classified viewport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMode {
    /// Large enough to draw.
    Fullscreen,
    /// Desktop window below the drawing thresholds; input denied, content
    /// preserved until the window grows back.
    ConstrainedDesktop,
    /// Mobile-class device; input denied for the whole session.
    ConstrainedMobile,
}

/// User-facing outcome of a viewport change. These are notices, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateNotice {
    /// Drawing content was captured and will come back with fullscreen.
    ContentPreserved,
    /// Previously preserved content was restored.
    ContentRestored,
}

/// Content parked across a fullscreen -> constrained transition.
#[derive(Debug, Clone)]
struct PreservedSession {
    snapshot: Snapshot,
    history: HistoryStack,
}

/// Decides when drawing input is allowed and preserves in-progress content
/// across fullscreen <-> constrained transitions.
///
/// Device class is fixed at construction; only window dimensions move the
/// state machine afterwards. A single preserved slot is kept: each shrink
/// overwrites it, so only the most recent one is recoverable.
#[derive(Debug)]
pub struct ViewportGate {
    mode: ViewportMode,
    is_mobile: bool,
    min_width: u32,
    min_height: u32,
    preserved: Option<PreservedSession>,
}

impl ViewportGate {
    /// Classify the device once and the initial window dimensions.
    pub fn new(
        classifier: &dyn DeviceClassifier,
        min_width: u32,
        min_height: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let is_mobile = classifier.is_mobile();
        let mut gate = Self {
            mode: ViewportMode::ConstrainedDesktop,
            is_mobile,
            min_width,
            min_height,
            preserved: None,
        };
        gate.mode = gate.classify(width, height);
        gate
    }

    fn classify(&self, width: u32, height: u32) -> ViewportMode {
        if self.is_mobile {
            ViewportMode::ConstrainedMobile
        } else if width >= self.min_width && height >= self.min_height {
            ViewportMode::Fullscreen
        } else {
            ViewportMode::ConstrainedDesktop
        }
    }

    /// Current viewport mode.
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Whether drawing input is currently allowed.
    pub fn allows_input(&self) -> bool {
        self.mode == ViewportMode::Fullscreen
    }

    /// Whether a preserved snapshot is pending restore.
    pub fn has_preserved(&self) -> bool {
        self.preserved.is_some()
    }

    /// Reclassify after a window change, keeping the surface dimensions in
    /// step and preserving or restoring drawing content as thresholds are
    /// crossed.
    ///
    /// Two independent preservation mechanisms run here: the
    /// threshold-crossing capture/restore below, and the continuous
    /// scale-to-fit preservation inside `Surface::resize` that applies to
    /// every dimension change.
    pub fn handle_resize(
        &mut self,
        width: u32,
        height: u32,
        surface: &mut Surface,
        history: &mut HistoryStack,
    ) -> Result<Option<GateNotice>, SurfaceError> {
        let next = self.classify(width, height);
        let mut notice = None;

        if self.mode == ViewportMode::Fullscreen
            && next == ViewportMode::ConstrainedDesktop
            && history.has_content()
        {
            // Capture at full resolution, before the buffer is reallocated.
            self.preserved = Some(PreservedSession {
                snapshot: surface.snapshot(),
                history: history.clone(),
            });
            history.clear();
            notice = Some(GateNotice::ContentPreserved);
            log::info!(
                "viewport shrank below {}x{}; drawing content preserved",
                self.min_width,
                self.min_height
            );
        }

        surface.resize(width, height)?;

        if next == ViewportMode::Fullscreen {
            if let Some(preserved) = self.preserved.take() {
                surface.restore_scaled(&preserved.snapshot);
                *history = preserved.history;
                notice = Some(GateNotice::ContentRestored);
                log::info!("fullscreen regained; preserved drawing restored");
            }
        }

        self.mode = next;
        Ok(notice)
    }
}
