//! Single-shot upload sessions and status tracking.

use uuid::Uuid;

use crate::{
    capability::ObjectStore,
    error::StorageError,
    handle::{ImageHandle, ImageId},
};

/// Lifecycle of the selected image's upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    /// No upload has been requested for this image.
    #[default]
    NotStarted,
    /// An upload session is running.
    InProgress,
    /// The store accepted the payload under this key.
    Succeeded(String),
    /// The store reported a failure; retrying mints a fresh key.
    Failed(StorageError),
}

impl UploadStatus {
    /// True while a session for this image is running.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, UploadStatus::InProgress)
    }

    /// True once the status reached `Succeeded` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Succeeded(_) | UploadStatus::Failed(_))
    }
}

/// Terminal outcome of one upload run, tagged with the originating image.
#[derive(Debug, Clone)]
pub struct UploadUpdate {
    pub(crate) tag: ImageId,
    pub(crate) status: UploadStatus,
}

impl UploadUpdate {
    /// Identity of the image this upload was started for.
    pub fn tag(&self) -> ImageId {
        self.tag
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }
}

/// One upload, bound to the bytes captured at creation.
///
/// The storage key is minted here, once per session, so a retry is a new
/// session and therefore a new key. Selecting a different image does not
/// disturb a running session; it keeps the handle it was created with.
#[derive(Debug)]
pub struct UploadSession {
    image: ImageHandle,
    key: String,
}

impl UploadSession {
    pub(crate) fn new(image: ImageHandle) -> Self {
        Self {
            image,
            key: new_storage_key(),
        }
    }

    /// Identity of the image this session will report against.
    pub fn image_id(&self) -> ImageId {
        self.image.id()
    }

    /// The key this session will write to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Invoke the store once; the outcome is terminal either way.
    pub fn run(self, store: &dyn ObjectStore) -> UploadUpdate {
        let tag = self.image.id();
        let status = match store.put_object(&self.key, self.image.bytes()) {
            Ok(()) => UploadStatus::Succeeded(self.key),
            Err(err) => UploadStatus::Failed(err),
        };
        UploadUpdate { tag, status }
    }
}

/// Mint a fresh storage key: `images/` plus a random UUID.
fn new_storage_key() -> String {
    format!("images/{}", Uuid::new_v4())
}
