//! Failure taxonomy for a sync run.
//!
//! Every variant is fatal. The run aborts on the first error and the
//! watermark file is left untouched, so the next run retries the same
//! window.

use std::path::PathBuf;

use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The previous watermark could not be read. Raised before any
    /// network call is made.
    #[error("cannot read watermark from {}: {reason}", .path.display())]
    WatermarkUnavailable { path: PathBuf, reason: String },

    /// The Pocket retrieve call failed: transport error, non-success
    /// status, or a body that does not parse.
    #[error("pocket fetch failed: {reason}")]
    FetchFailed { reason: String },

    /// Pinboard rejected an item. Earlier items in the batch are already
    /// posted; later ones are not attempted.
    #[error("pinboard post failed for {url}: {reason}")]
    PostFailed { url: String, reason: String },

    /// The advanced watermark could not be persisted after a fully
    /// posted batch. The next run will re-post the batch.
    #[error("cannot persist watermark to {}: {reason}", .path.display())]
    WatermarkWriteFailed { path: PathBuf, reason: String },
}
