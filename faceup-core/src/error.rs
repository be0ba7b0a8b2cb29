//! Error taxonomy shared across the workflow.
//!
//! None of these are fatal to the process. Detection and storage failures are
//! recoverable and surface as workflow state; workflow errors are rejected
//! requests that leave existing state untouched. Stale async results are not
//! errors at all and never appear here.

use thiserror::Error;

/// Failure reported by the detection capability.
///
/// Recoverable: the workflow clears its detection state and the face count
/// reads zero until a later detection commits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// The detector could not make sense of the image payload.
    #[error("detector could not decode the image: {0}")]
    MalformedImage(String),
    /// The detection backend is missing or failed to start.
    #[error("face detector unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by the storage capability.
///
/// Recoverable: the upload status becomes `Failed` with this reason and the
/// user may retry once the session is no longer in flight.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store could not be reached.
    #[error("network error: {0}")]
    Network(String),
    /// The store was reached but refused the request.
    #[error("storage service rejected the request: {0}")]
    Service(String),
    /// The transfer was cancelled before completion.
    #[error("upload cancelled")]
    Cancelled,
}

/// A transition request the workflow refused.
///
/// Rejections, not faults: nothing was spawned, no key was minted, and the
/// caller is simply informed that the action was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Detection and upload require a selected image.
    #[error("no image is selected")]
    NoImageSelected,
    /// At most one upload per selected image may be in flight.
    #[error("an upload for the selected image is already in progress")]
    UploadAlreadyInProgress,
}
