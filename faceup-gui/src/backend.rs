//! Built-in capability backends wired in at startup.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use faceup_core::{
    DetectionError, DetectorOptions, FaceBox, FaceDetector, ImageHandle, ObjectStore, StorageError,
};
use log::debug;

/// Placeholder detector emitting one box centered on the photo.
///
/// The box covers the middle third of each native dimension, which is enough
/// to drive the selection, overlay, and upload paths until a model-backed
/// detector is wired in.
pub struct StubDetector;

impl FaceDetector for StubDetector {
    fn detect_faces(
        &self,
        image: &ImageHandle,
        options: &DetectorOptions,
    ) -> Result<Vec<FaceBox>, DetectionError> {
        let (width, height) = image.native_size();
        if width == 0 || height == 0 {
            return Err(DetectionError::MalformedImage(
                "image has zero pixel area".to_string(),
            ));
        }

        debug!(
            "Stub detection over {} ({width}x{height}, {} mode)",
            image.id(),
            options.performance
        );

        let w = width as f32 / 3.0;
        let h = height as f32 / 3.0;
        Ok(vec![FaceBox::new(w, h, w, h)])
    }
}

/// Object store writing each object as a file under a root directory.
///
/// Key segments separated by `/` become path components, so the workflow's
/// `images/<uuid>` keys land in an `images/` subdirectory.
pub struct DirObjectStore {
    root: PathBuf,
}

impl DirObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|segment| !segment.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl ObjectStore for DirObjectStore {
    fn put_object(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(store_error)?;
        }
        fs::write(&path, bytes).map_err(store_error)?;
        debug!("Stored {} byte(s) at {}", bytes.len(), path.display());
        Ok(())
    }
}

fn store_error(err: io::Error) -> StorageError {
    StorageError::Service(err.to_string())
}
