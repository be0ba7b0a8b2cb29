//! Workflow state and transitions.
//!
//! One `Workflow` instance holds the current selection, the committed face
//! boxes, and per-identity upload records. All mutation goes through the
//! transition methods; background jobs hand their tagged updates back to the
//! owning thread, and the identity gate decides whether an update commits or is
//! dropped as stale. A multi-threaded embedder must serialize access itself;
//! the struct is plain owned state, not a synchronization primitive.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::{
    capability::DetectorOptions,
    detection::{DetectionSession, DetectionUpdate},
    error::{DetectionError, WorkflowError},
    geometry::FaceBox,
    handle::{ImageHandle, ImageId, PickedImage},
    upload::{UploadSession, UploadStatus, UploadUpdate},
};

/// Coarse workflow phase for presentation layers.
///
/// Busy phases win: an in-flight upload reads as `Uploading` even though the
/// committed detection persists underneath and stays queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// Nothing selected yet.
    Idle,
    /// An image is selected; no detection has committed for it.
    ImageSelected,
    /// A detection for the current image is pending.
    Detecting,
    /// A detection committed for the current image (possibly zero faces).
    DetectionComplete,
    /// An upload for the current image is in flight.
    Uploading,
}

/// What `begin_detection` decided to do.
#[derive(Debug)]
pub enum DetectionDispatch {
    /// A new session was created; run it and feed the update back.
    Started(DetectionSession),
    /// A detection for the current image is already pending; nothing spawned.
    AlreadyPending,
}

/// What became of a finished detection handed to `apply_detection`.
#[derive(Debug)]
pub enum DetectionApplied {
    /// The update matched the current selection; its boxes are now visible.
    Committed { face_count: usize },
    /// The capability failed for the current selection; boxes were cleared.
    Failed(DetectionError),
    /// The update's identity no longer matches the selection; state untouched.
    Stale,
}

/// What became of a finished upload handed to `apply_upload`.
#[derive(Debug)]
pub enum UploadApplied {
    /// Terminal status for the current selection.
    Current(UploadStatus),
    /// Terminal status for an image that is no longer selected; recorded
    /// against its own identity, never shown as the current status.
    Superseded { tag: ImageId, status: UploadStatus },
}

/// The top-level controller: current image, detection state, upload records.
pub struct Workflow {
    options: DetectorOptions,
    next_id: u64,
    image: Option<ImageHandle>,
    boxes: Vec<FaceBox>,
    detection_complete: bool,
    pending_detection: Option<ImageId>,
    uploads: HashMap<ImageId, UploadStatus>,
}

impl Workflow {
    pub fn new(options: DetectorOptions) -> Self {
        Self {
            options,
            next_id: 0,
            image: None,
            boxes: Vec::new(),
            detection_complete: false,
            pending_detection: None,
            uploads: HashMap::new(),
        }
    }

    /// Make `picked` the current selection and return its identity.
    ///
    /// Always legal. Detection state resets to empty and the new image starts
    /// with `NotStarted` upload status. Sessions still running for the previous
    /// identity are not cancelled; their updates fail the identity gate when
    /// they eventually arrive.
    pub fn select_image(&mut self, picked: PickedImage) -> ImageId {
        self.next_id += 1;
        let id = ImageId(self.next_id);
        let handle = ImageHandle::new(id, picked);
        info!(
            "Selected {id} ({}x{} pixels)",
            handle.width(),
            handle.height()
        );

        self.image = Some(handle);
        self.boxes.clear();
        self.detection_complete = false;
        self.pending_detection = None;

        // Keep only records that can still receive a late terminal result.
        self.uploads.retain(|_, status| status.is_in_progress());
        self.uploads.insert(id, UploadStatus::NotStarted);
        id
    }

    /// Start a detection for the current selection unless one is pending.
    ///
    /// A second request while the first is outstanding coalesces into it
    /// rather than spawning a concurrent detection for the same image.
    pub fn begin_detection(&mut self) -> Result<DetectionDispatch, WorkflowError> {
        let image = self.image.as_ref().ok_or(WorkflowError::NoImageSelected)?;
        if self.pending_detection == Some(image.id()) {
            debug!("Detection already pending for {}; request coalesced", image.id());
            return Ok(DetectionDispatch::AlreadyPending);
        }

        self.pending_detection = Some(image.id());
        Ok(DetectionDispatch::Started(DetectionSession::new(
            image.clone(),
            self.options,
        )))
    }

    /// Commit or drop a finished detection, gated on image identity.
    pub fn apply_detection(&mut self, update: DetectionUpdate) -> DetectionApplied {
        if Some(update.tag) != self.image_id() {
            debug!("Ignoring stale detection result for {}", update.tag);
            return DetectionApplied::Stale;
        }

        self.pending_detection = None;
        match update.outcome {
            Ok(boxes) => {
                let face_count = boxes.len();
                info!("Detection committed for {}: {face_count} face(s)", update.tag);
                self.boxes = boxes;
                self.detection_complete = true;
                DetectionApplied::Committed { face_count }
            }
            Err(err) => {
                warn!("Detection failed for {}: {err}", update.tag);
                self.boxes.clear();
                self.detection_complete = false;
                DetectionApplied::Failed(err)
            }
        }
    }

    /// Start an upload for the current selection.
    ///
    /// Rejected while a session for this image is in flight; a rejected
    /// request mints no key and spawns nothing.
    pub fn begin_upload(&mut self) -> Result<UploadSession, WorkflowError> {
        let image = self.image.as_ref().ok_or(WorkflowError::NoImageSelected)?;
        let status = self.uploads.entry(image.id()).or_default();
        if status.is_in_progress() {
            return Err(WorkflowError::UploadAlreadyInProgress);
        }

        *status = UploadStatus::InProgress;
        Ok(UploadSession::new(image.clone()))
    }

    /// Record a finished upload against the image it was started for.
    ///
    /// The record always lands on the update's own identity; a late arrival
    /// after reselection is reported as `Superseded` and never shown as the
    /// current image's status.
    pub fn apply_upload(&mut self, update: UploadUpdate) -> UploadApplied {
        match &update.status {
            UploadStatus::Succeeded(key) => info!("Upload for {} stored at {key}", update.tag),
            UploadStatus::Failed(err) => warn!("Upload for {} failed: {err}", update.tag),
            _ => {}
        }

        self.uploads.insert(update.tag, update.status.clone());
        if Some(update.tag) == self.image_id() {
            UploadApplied::Current(update.status)
        } else {
            debug!("Upload result for {} arrived after reselection", update.tag);
            UploadApplied::Superseded {
                tag: update.tag,
                status: update.status,
            }
        }
    }

    /// The current selection, if any.
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// Identity of the current selection.
    pub fn image_id(&self) -> Option<ImageId> {
        self.image.as_ref().map(ImageHandle::id)
    }

    /// Native `(width, height)` of the current selection for the mapper.
    pub fn native_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(ImageHandle::native_size)
    }

    /// Committed face boxes for the current selection, in emission order.
    pub fn boxes(&self) -> &[FaceBox] {
        &self.boxes
    }

    /// Face count derived from the committed boxes.
    pub fn face_count(&self) -> usize {
        self.boxes.len()
    }

    /// True while a detection for the current selection is outstanding.
    pub fn detection_pending(&self) -> bool {
        self.pending_detection.is_some()
    }

    /// Upload status of the current selection.
    pub fn upload_status(&self) -> UploadStatus {
        self.image_id()
            .and_then(|id| self.uploads.get(&id).cloned())
            .unwrap_or_default()
    }

    /// Status recorded for a specific identity, if it is still tracked.
    pub fn upload_status_for(&self, id: ImageId) -> Option<UploadStatus> {
        self.uploads.get(&id).cloned()
    }

    /// Coarse phase for presentation.
    pub fn phase(&self) -> WorkflowPhase {
        if self.image.is_none() {
            return WorkflowPhase::Idle;
        }
        if self.upload_status().is_in_progress() {
            return WorkflowPhase::Uploading;
        }
        if self.detection_pending() {
            return WorkflowPhase::Detecting;
        }
        if self.detection_complete {
            WorkflowPhase::DetectionComplete
        } else {
            WorkflowPhase::ImageSelected
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(DetectorOptions::default())
    }
}
