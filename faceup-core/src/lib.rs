//! Photo workflow core: selection, face detection, and upload.
//!
//! This crate owns the coordinate mapping between native image pixels and the
//! rendered display surface, the single-shot detection and upload sessions, and
//! the state machine that sequences selection → detection → upload while
//! discarding stale asynchronous results.

/// Injected capability seams (face detector, object store).
pub mod capability;
/// Single-shot detection sessions and result normalization.
pub mod detection;
/// Error taxonomy shared across the workflow.
pub mod error;
/// Pixel-space to display-space rectangle mapping.
pub mod geometry;
/// Image identity and the selected-image handle.
pub mod handle;
/// Single-shot upload sessions and status tracking.
pub mod upload;
/// Workflow state and transitions.
pub mod workflow;

pub use capability::{DetectorOptions, FaceDetector, ObjectStore};
pub use detection::{DetectionSession, DetectionUpdate};
pub use error::{DetectionError, StorageError, WorkflowError};
pub use geometry::{DisplayFrame, DisplayRect, FaceBox, ScalingPolicy, image_placement, map_box};
pub use handle::{ImageHandle, ImageId, PickedImage};
pub use upload::{UploadSession, UploadStatus, UploadUpdate};
pub use workflow::{DetectionApplied, DetectionDispatch, UploadApplied, Workflow, WorkflowPhase};

/// Returns the crate version for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
