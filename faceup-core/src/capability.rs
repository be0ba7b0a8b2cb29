//! Injected capability seams: face detection and object storage.
//!
//! The workflow never talks to a concrete detector or store. Front ends wire
//! implementations in at startup; tests substitute scriptable mocks.

use faceup_utils::config::{DetectorSettings, PerformanceMode};

use crate::{
    error::{DetectionError, StorageError},
    geometry::FaceBox,
    handle::ImageHandle,
};

/// Options forwarded to the detection capability on every call.
///
/// Defaults mirror the workflow's needs: fast mode, boxes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetectorOptions {
    /// Performance/accuracy trade-off.
    pub performance: PerformanceMode,
    /// Request facial landmark output.
    pub landmarks: bool,
    /// Request expression classification output.
    pub classification: bool,
}

impl From<&DetectorSettings> for DetectorOptions {
    fn from(settings: &DetectorSettings) -> Self {
        Self {
            performance: settings.performance,
            landmarks: settings.landmarks,
            classification: settings.classification,
        }
    }
}

/// Face-detection capability.
///
/// Implementations receive the selected image (encoded payload plus native
/// dimensions) and report axis-aligned boxes in native pixel coordinates.
/// Output sanity is not assumed: the detection session clamps and filters boxes
/// before they reach the workflow.
pub trait FaceDetector: Send + Sync {
    fn detect_faces(
        &self,
        image: &ImageHandle,
        options: &DetectorOptions,
    ) -> Result<Vec<FaceBox>, DetectionError>;
}

/// Object-storage capability.
///
/// Stores the payload under the caller-supplied key, overwriting any previous
/// object at that key.
pub trait ObjectStore: Send + Sync {
    fn put_object(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_detector_settings() {
        let mut settings = DetectorSettings::default();
        let options = DetectorOptions::from(&settings);
        assert_eq!(options, DetectorOptions::default());
        assert_eq!(options.performance, PerformanceMode::Fast);
        assert!(!options.landmarks);
        assert!(!options.classification);

        settings.performance = PerformanceMode::Accurate;
        settings.landmarks = true;
        let options = DetectorOptions::from(&settings);
        assert_eq!(options.performance, PerformanceMode::Accurate);
        assert!(options.landmarks);
    }
}
