//! Bounded undo/redo history over raster snapshots.

use std::collections::VecDeque;

use crate::surface::{RestoreError, Snapshot, Surface};

/// Default maximum number of undo snapshots to keep.
///
/// Each entry costs a full raster, so the undo side is a bounded deque:
/// recording past the cap evicts the oldest entry.
pub const DEFAULT_HISTORY_CAP: usize = 50;

/// Undo/redo stacks of raster snapshots.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    cap: usize,
    has_content: bool,
}

impl HistoryStack {
    /// Create an empty history bounded to `cap` undo entries (at least 1).
    pub fn new(cap: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            cap: cap.max(1),
            has_content: false,
        }
    }

    /// Push the current surface state onto undo (call before mutating).
    ///
    /// Clears the redo stack and marks the canvas as having content. The
    /// oldest undo entry is evicted once the cap is exceeded.
    pub fn record_before_mutation(&mut self, surface: &mut Surface) {
        self.undo.push_back(surface.snapshot());
        self.redo.clear();
        self.has_content = true;
        while self.undo.len() > self.cap {
            self.undo.pop_front();
            log::debug!("undo history at cap {}; evicted oldest entry", self.cap);
        }
    }

    /// Undo the most recent mutation.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. Fails closed on a
    /// snapshot/surface dimension mismatch: both stacks and the buffer are
    /// left exactly as they were.
    pub fn undo(&mut self, surface: &mut Surface) -> Result<bool, RestoreError> {
        match self.undo.pop_back() {
            None => Ok(false),
            Some(snapshot) => {
                if snapshot.width() != surface.width() || snapshot.height() != surface.height() {
                    let err = RestoreError::DimensionMismatch {
                        snapshot_width: snapshot.width(),
                        snapshot_height: snapshot.height(),
                        surface_width: surface.width(),
                        surface_height: surface.height(),
                    };
                    log::warn!("undo refused: {err}");
                    self.undo.push_back(snapshot);
                    return Err(err);
                }
                self.redo.push(surface.snapshot());
                surface.restore(&snapshot)?;
                Ok(true)
            }
        }
    }

    /// Redo the most recently undone mutation; symmetric inverse of `undo`.
    pub fn redo(&mut self, surface: &mut Surface) -> Result<bool, RestoreError> {
        match self.redo.pop() {
            None => Ok(false),
            Some(snapshot) => {
                if snapshot.width() != surface.width() || snapshot.height() != surface.height() {
                    let err = RestoreError::DimensionMismatch {
                        snapshot_width: snapshot.width(),
                        snapshot_height: snapshot.height(),
                        surface_width: surface.width(),
                        surface_height: surface.height(),
                    };
                    log::warn!("redo refused: {err}");
                    self.redo.push(snapshot);
                    return Err(err);
                }
                self.undo.push_back(surface.snapshot());
                surface.restore(&snapshot)?;
                Ok(true)
            }
        }
    }

    /// Empty both stacks and reset the content flag.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.has_content = false;
    }

    /// Whether anything has been drawn since the last clear.
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo entries currently held.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Configured undo cap.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}
