//! Inkwall application shell (headless).
//!
//! Everything outside the core engine: PNG export, the submission pipeline
//! against the upload collaborator, and the keyboard shortcut table.

pub mod export;
pub mod shortcuts;
pub mod submit;

pub use export::{ExportError, encode_png};
pub use shortcuts::{Action, SHORTCUTS, Shortcut, resolve};
pub use submit::{
    FailureMode, MemoryUploader, StoredSubmission, SubmissionPipeline, SubmissionReceipt,
    SubmitError, Uploader,
};
