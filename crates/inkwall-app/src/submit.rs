//! Submission pipeline against the upload collaborator.
//!
//! The pipeline hands a point-in-time PNG to the collaborator; on any
//! failure the session is left untouched so the user can retry.

use std::cell::RefCell;

use inkwall_core::{AnalyticsEvent, DrawingSession};
use thiserror::Error;
use uuid::Uuid;

use crate::export::{ExportError, encode_png};

/// Submission errors.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("metadata write rejected: {0}")]
    MetadataWrite(String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Receipt returned by the upload collaborator on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Object name assigned in storage.
    pub filename: String,
    /// Public URL recorded in the metadata store.
    pub public_url: String,
}

/// Object-storage + metadata collaborator.
///
/// Implementations own both the binary upload and the metadata row insert;
/// either step may fail with the corresponding `SubmitError` variant.
pub trait Uploader {
    fn upload(&self, image: &[u8], display_name: &str) -> Result<SubmissionReceipt, SubmitError>;
}

/// Which step of a `MemoryUploader` submission should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    None,
    Upload,
    MetadataWrite,
}

/// A stored submission, as the in-memory collaborator keeps it.
#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub filename: String,
    pub display_name: String,
    pub image: Vec<u8>,
    /// Moderation status; always starts out pending and is never read back
    /// by the engine.
    pub status: &'static str,
}

/// In-memory collaborator double for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryUploader {
    submissions: RefCell<Vec<StoredSubmission>>,
    failure: FailureMode,
}

impl MemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collaborator that fails at the given step.
    pub fn failing(failure: FailureMode) -> Self {
        Self {
            submissions: RefCell::new(Vec::new()),
            failure,
        }
    }

    /// Copy of everything stored so far.
    pub fn submissions(&self) -> Vec<StoredSubmission> {
        self.submissions.borrow().clone()
    }
}

impl Uploader for MemoryUploader {
    fn upload(&self, image: &[u8], display_name: &str) -> Result<SubmissionReceipt, SubmitError> {
        match self.failure {
            FailureMode::Upload => {
                return Err(SubmitError::Upload("storage unavailable".into()));
            }
            FailureMode::MetadataWrite => {
                return Err(SubmitError::MetadataWrite("insert rejected".into()));
            }
            FailureMode::None => {}
        }
        let filename = format!("drawing-{}.png", Uuid::new_v4());
        self.submissions.borrow_mut().push(StoredSubmission {
            filename: filename.clone(),
            display_name: display_name.to_string(),
            image: image.to_vec(),
            status: "pending",
        });
        Ok(SubmissionReceipt {
            public_url: format!("memory://drawings/{filename}"),
            filename,
        })
    }
}

/// Drives finalize -> encode -> upload, with retry-safe failure handling.
pub struct SubmissionPipeline<U: Uploader> {
    uploader: U,
}

impl<U: Uploader> SubmissionPipeline<U> {
    pub fn new(uploader: U) -> Self {
        Self { uploader }
    }

    /// Submit the session's drawing under the given display name.
    ///
    /// The raster is captured before anything else happens, so strokes
    /// drawn during a slow upload cannot leak into the submitted image.
    /// On success the canvas is cleared; on failure it is left exactly as
    /// it was.
    pub fn submit(
        &self,
        session: &mut DrawingSession,
        display_name: &str,
    ) -> Result<SubmissionReceipt, SubmitError> {
        session.emit(&AnalyticsEvent::SaveClicked);
        let raster = session.finalize_raster();
        let result = encode_png(&raster)
            .map_err(SubmitError::from)
            .and_then(|bytes| self.uploader.upload(&bytes, display_name));

        match result {
            Ok(receipt) => {
                log::info!("drawing submitted as {}", receipt.filename);
                session.clear();
                session.emit(&AnalyticsEvent::SubmissionResult { accepted: true });
                Ok(receipt)
            }
            Err(err) => {
                log::warn!("submission failed, canvas kept for retry: {err}");
                session.emit(&AnalyticsEvent::SubmissionResult { accepted: false });
                Err(err)
            }
        }
    }
}
