//! Type definitions for the faceup GUI application.

use std::{
    path::PathBuf,
    sync::{Arc, mpsc},
};

use egui::{ColorImage, Context as EguiContext, TextureHandle, TextureOptions};
use faceup_core::{DetectionUpdate, FaceDetector, ObjectStore, UploadUpdate, Workflow};
use faceup_utils::config::AppSettings;

/// A result message delivered from a background job to the UI thread.
///
/// The image identity travels inside the update; the workflow decides on
/// arrival whether the result still belongs to the current selection.
pub enum JobMessage {
    DetectionFinished(DetectionUpdate),
    UploadFinished(UploadUpdate),
}

/// State of the photo preview panel.
#[derive(Default)]
pub struct PreviewState {
    /// Texture holding the decoded current selection.
    pub texture: Option<TextureHandle>,
    /// Counter used to generate unique texture names.
    pub texture_seq: u64,
}

impl PreviewState {
    /// Installs a new preview texture, retiring the previous one.
    pub fn install(&mut self, ctx: &EguiContext, image: ColorImage) {
        let name = format!("faceup-preview-{}", self.texture_seq);
        self.texture_seq = self.texture_seq.wrapping_add(1);
        self.texture = Some(ctx.load_texture(name, image, TextureOptions::LINEAR));
    }
}

/// The main application state for the faceup GUI.
pub struct FaceupApp {
    /// User-configurable settings.
    pub settings: AppSettings,
    /// Path to the settings file on disk.
    pub settings_path: PathBuf,
    /// The current status message displayed in the top bar.
    pub status_line: String,
    /// The last error message, if any.
    pub last_error: Option<String>,
    /// Selection, detection, and upload state. Every background result is
    /// gated through it so stale sessions never touch the visible state.
    pub workflow: Workflow,
    /// The detection capability handed to background jobs.
    pub detector: Arc<dyn FaceDetector>,
    /// The object store receiving uploaded photos.
    pub store: Arc<dyn ObjectStore>,
    /// Sender cloned into background jobs.
    pub job_tx: mpsc::Sender<JobMessage>,
    /// Receiver drained once per frame.
    pub job_rx: mpsc::Receiver<JobMessage>,
    /// State of the photo preview panel.
    pub preview: PreviewState,
}
