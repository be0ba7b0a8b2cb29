use std::path::Path;

use anyhow::{Context as AnyhowContext, Result};
use egui::{ColorImage, Context as EguiContext};
use faceup_core::{DetectionDispatch, PickedImage, ScalingPolicy, WorkflowError};
use log::debug;

use crate::{jobs, settings::persist_settings_with_feedback, types::FaceupApp};

impl FaceupApp {
    /// Opens a file dialog to select a photo.
    ///
    /// Closing the dialog without picking anything is not an error; the
    /// current selection stays as it was.
    pub(crate) fn open_image_dialog(&mut self, ctx: &EguiContext) {
        use rfd::FileDialog;

        match FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp"])
            .pick_file()
        {
            Some(path) => self.select_image_from_path(ctx, &path),
            None => debug!("Photo selection cancelled"),
        }
    }

    /// Reads and decodes the photo at `path`, makes it the current selection,
    /// and starts detection for it.
    ///
    /// A failed read or decode leaves the previous selection untouched.
    pub(crate) fn select_image_from_path(&mut self, ctx: &EguiContext, path: &Path) {
        match load_picked_image(path) {
            Ok((picked, color_image)) => {
                let id = self.workflow.select_image(picked);
                self.preview.install(ctx, color_image);
                self.show_success(format!("Selected {} as {id}", path.display()));
                self.begin_detection();
            }
            Err(err) => {
                self.show_error(
                    "Could not open that photo. Pick a decodable image file.",
                    format!("Selection error: {err:#}"),
                );
            }
        }
    }

    /// Runs detection for the current selection on the worker pool.
    ///
    /// A request while one is already pending coalesces into it and spawns
    /// nothing.
    pub(crate) fn begin_detection(&mut self) {
        match self.workflow.begin_detection() {
            Ok(DetectionDispatch::Started(session)) => {
                jobs::start_detection(session, self.detector.clone(), self.job_tx.clone());
            }
            Ok(DetectionDispatch::AlreadyPending) => {}
            Err(err) => {
                self.show_error("Select a photo first.", format!("Detection request: {err}"));
            }
        }
    }

    /// Starts uploading the current selection's bytes under a fresh key.
    pub(crate) fn begin_upload(&mut self) {
        match self.workflow.begin_upload() {
            Ok(session) => {
                self.show_success(format!("Uploading to {}", session.key()));
                jobs::start_upload(session, self.store.clone(), self.job_tx.clone());
            }
            Err(err @ WorkflowError::UploadAlreadyInProgress) => {
                self.show_error(
                    "This photo is already uploading; the duplicate request was ignored.",
                    format!("Upload request: {err}"),
                );
            }
            Err(err) => {
                self.show_error("Select a photo first.", format!("Upload request: {err}"));
            }
        }
    }

    /// Flips the face overlay visibility and persists the preference.
    pub(crate) fn toggle_overlay(&mut self) {
        self.settings.display.show_overlay = !self.settings.display.show_overlay;
        if let Err(message) = persist_settings_with_feedback(&self.settings, &self.settings_path) {
            self.show_error("Settings could not be saved.", message);
        }
    }

    /// Scaling policy parsed from settings; unknown strings fall back to `Fit`.
    pub(crate) fn scaling_policy(&self) -> ScalingPolicy {
        self.settings.display.scaling.parse().unwrap_or_default()
    }

    /// True while a detection or upload job for the current selection is
    /// outstanding.
    pub(crate) fn is_busy(&self) -> bool {
        self.workflow.detection_pending() || self.workflow.upload_status().is_in_progress()
    }

    pub(crate) fn show_success(&mut self, message: impl Into<String>) {
        self.status_line = message.into();
        self.last_error = None;
    }

    pub(crate) fn show_error(&mut self, headline: impl Into<String>, detail: impl Into<String>) {
        self.status_line = headline.into();
        self.last_error = Some(detail.into());
    }
}

/// Decodes the file once, yielding the workflow image and the texture pixels.
fn load_picked_image(path: &Path) -> Result<(PickedImage, ColorImage)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let decoded = image::load_from_memory(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let picked = PickedImage::from_parts(decoded.width(), decoded.height(), bytes);
    Ok((picked, color_image))
}
