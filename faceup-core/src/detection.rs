//! Single-shot detection sessions and result normalization.

use crate::{
    capability::{DetectorOptions, FaceDetector},
    error::DetectionError,
    geometry::FaceBox,
    handle::{ImageHandle, ImageId},
};

/// Outcome of one detection run, tagged with the image identity it was
/// computed from.
///
/// The workflow's identity gate decides whether an update commits; an update
/// whose tag no longer matches the current selection is dropped unseen.
#[derive(Debug, Clone)]
pub struct DetectionUpdate {
    pub(crate) tag: ImageId,
    pub(crate) outcome: Result<Vec<FaceBox>, DetectionError>,
}

impl DetectionUpdate {
    /// Identity of the image this update was computed from.
    pub fn tag(&self) -> ImageId {
        self.tag
    }

    pub fn outcome(&self) -> &Result<Vec<FaceBox>, DetectionError> {
        &self.outcome
    }
}

/// One detect-faces request, bound to the image it was started for.
///
/// A session invokes the capability exactly once; re-running a detection means
/// creating a new session through the workflow.
#[derive(Debug)]
pub struct DetectionSession {
    image: ImageHandle,
    options: DetectorOptions,
}

impl DetectionSession {
    pub(crate) fn new(image: ImageHandle, options: DetectorOptions) -> Self {
        Self { image, options }
    }

    /// Identity of the image this session will report against.
    pub fn image_id(&self) -> ImageId {
        self.image.id()
    }

    /// Invoke the capability once and tag whatever comes back.
    ///
    /// Successful output is normalized into the native image bounds before it
    /// is handed to the workflow.
    pub fn run(self, detector: &dyn FaceDetector) -> DetectionUpdate {
        let tag = self.image.id();
        let outcome = detector
            .detect_faces(&self.image, &self.options)
            .map(|boxes| normalize_boxes(boxes, self.image.native_size()));
        DetectionUpdate { tag, outcome }
    }
}

/// Clamp detector output into native bounds and drop boxes with non-finite
/// components. Emission order is preserved; degenerate boxes collapse to zero
/// extent rather than disappearing.
fn normalize_boxes(boxes: Vec<FaceBox>, native: (u32, u32)) -> Vec<FaceBox> {
    let width = native.0 as f32;
    let height = native.1 as f32;
    boxes
        .into_iter()
        .filter(FaceBox::is_finite)
        .map(|bbox| {
            let x = bbox.x.clamp(0.0, width);
            let y = bbox.y.clamp(0.0, height);
            let right = bbox.right().max(bbox.x).clamp(x, width);
            let bottom = bbox.bottom().max(bbox.y).clamp(y, height);
            FaceBox::new(x, y, right - x, bottom - y)
        })
        .collect()
}
