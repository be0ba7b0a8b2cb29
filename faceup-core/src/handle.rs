//! Image identity and the selected-image handle.

use std::{fmt, sync::Arc};

use anyhow::{Context, Result};

/// Identity of one selection event.
///
/// Assigned by the workflow when an image becomes the current selection.
/// Identity is per selection, not per content: picking the same file twice
/// yields two distinct ids. Async results carry the id they were computed for,
/// and results whose id no longer matches the current selection are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub(crate) u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image #{}", self.0)
    }
}

/// A decoded image as produced by the picker, before identity is assigned.
#[derive(Debug, Clone)]
pub struct PickedImage {
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl PickedImage {
    /// Take ownership of an encoded payload, reading its native dimensions.
    pub fn from_encoded_bytes(bytes: Vec<u8>) -> Result<Self> {
        let decoded =
            image::load_from_memory(&bytes).context("failed to decode selected image")?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes: Arc::from(bytes),
        })
    }

    /// Build from dimensions the caller already decoded.
    pub fn from_parts(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes: Arc::from(bytes),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// The currently selected image: identity, native dimensions, and the original
/// encoded bytes.
///
/// The byte buffer is created once at selection and never mutated afterwards;
/// detection and upload sessions share it through the `Arc` without locking.
/// Handles are cheap to clone.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    id: ImageId,
    width: u32,
    height: u32,
    bytes: Arc<[u8]>,
}

impl ImageHandle {
    pub(crate) fn new(id: ImageId, picked: PickedImage) -> Self {
        Self {
            id,
            width: picked.width,
            height: picked.height,
            bytes: picked.bytes,
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Native `(width, height)` for the geometry mapper.
    pub fn native_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The encoded payload shared with sessions.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
