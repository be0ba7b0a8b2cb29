//! Application lifecycle, background-job plumbing, and the frame loop.

use std::{
    path::PathBuf,
    sync::{Arc, mpsc},
};

use eframe::{App, CreationContext, Frame};
use egui::{Context as EguiContext, Key};
use faceup_core::{
    DetectionApplied, DetectorOptions, FaceDetector, ObjectStore, UploadApplied, UploadStatus,
    Workflow,
};
use faceup_utils::{config::default_settings_path, configure_telemetry};
use log::info;

use crate::{
    backend::{DirObjectStore, StubDetector},
    settings::load_settings,
    types::{FaceupApp, JobMessage, PreviewState},
};

impl FaceupApp {
    /// Creates a new `FaceupApp` with the default backends.
    pub fn new(cc: &CreationContext<'_>) -> Self {
        Self::create(
            &cc.egui_ctx,
            default_settings_path(),
            Arc::new(StubDetector),
            None,
        )
    }

    /// Creates a new `FaceupApp` with a specific settings path and backends.
    ///
    /// When `store` is `None` a directory store rooted at the configured
    /// storage path is used.
    pub(crate) fn create(
        ctx: &EguiContext,
        settings_path: PathBuf,
        detector: Arc<dyn FaceDetector>,
        store: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        crate::theme::apply(ctx);

        info!("Loading GUI settings from {}", settings_path.display());
        let settings = load_settings(&settings_path);
        configure_telemetry(settings.telemetry.enabled, settings.telemetry.level_filter());
        if settings.telemetry.enabled {
            info!(
                "Telemetry logging enabled (level={:?})",
                settings.telemetry.level_filter()
            );
        }

        let store =
            store.unwrap_or_else(|| Arc::new(DirObjectStore::new(settings.storage.root.clone())));
        let workflow = Workflow::new(DetectorOptions::from(&settings.detector));
        let (job_tx, job_rx) = mpsc::channel();

        Self {
            settings,
            settings_path,
            status_line: "Pick a photo to find faces.".to_owned(),
            last_error: None,
            workflow,
            detector,
            store,
            job_tx,
            job_rx,
            preview: PreviewState::default(),
        }
    }

    /// Drains finished background jobs, once per frame.
    pub(crate) fn poll_worker(&mut self, ctx: &EguiContext) {
        let mut updated = false;

        while let Ok(message) = self.job_rx.try_recv() {
            self.handle_job_message(message);
            updated = true;
        }

        if updated {
            ctx.request_repaint();
        }
    }

    /// Handles a message from a background job.
    ///
    /// The workflow's identity gate runs first; a result for a superseded
    /// selection changes nothing visible.
    pub(crate) fn handle_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::DetectionFinished(update) => match self.workflow.apply_detection(update) {
                DetectionApplied::Committed { face_count } => {
                    self.show_success(format!("Detected {face_count} face(s)"));
                }
                DetectionApplied::Failed(err) => {
                    self.show_error(
                        "Detection failed. The photo is treated as having no faces.",
                        format!("Detection error: {err}"),
                    );
                }
                DetectionApplied::Stale => {}
            },
            JobMessage::UploadFinished(update) => match self.workflow.apply_upload(update) {
                UploadApplied::Current(UploadStatus::Succeeded(key)) => {
                    self.show_success(format!("Uploaded to {key}"));
                }
                UploadApplied::Current(UploadStatus::Failed(err)) => {
                    self.show_error(
                        "Upload failed. Try again when ready.",
                        format!("Upload error: {err}"),
                    );
                }
                UploadApplied::Current(_) | UploadApplied::Superseded { .. } => {}
            },
        }
    }

    /// Applies global keyboard shortcuts.
    pub(crate) fn handle_shortcuts(&mut self, ctx: &EguiContext) {
        let (open, detect, upload) = ctx.input(|input| {
            let command = input.modifiers.command;
            (
                command && input.key_pressed(Key::O),
                command && input.key_pressed(Key::D),
                command && input.key_pressed(Key::U),
            )
        });

        if open {
            self.open_image_dialog(ctx);
        }
        if detect && self.workflow.image().is_some() {
            self.begin_detection();
        }
        if upload && self.workflow.image().is_some() {
            self.begin_upload();
        }
    }
}

impl App for FaceupApp {
    fn update(&mut self, ctx: &EguiContext, _frame: &mut Frame) {
        self.poll_worker(ctx);
        self.show_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let palette = crate::theme::palette();
            egui::Frame::new()
                .fill(palette.canvas)
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    self.show_preview(ui);
                });
        });

        self.handle_shortcuts(ctx);

        if self.is_busy() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, sync::Mutex, time::Duration};

    use faceup_core::{
        DetectionDispatch, PickedImage, StorageError, UploadStatus, WorkflowPhase,
    };
    use faceup_utils::synthetic_photo;
    use serde_json::json;
    use tempfile::tempdir;

    struct FlakyStore {
        fail_first: Mutex<bool>,
    }

    impl ObjectStore for FlakyStore {
        fn put_object(&self, _key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            let mut fail = self.fail_first.lock().expect("store mutex");
            if *fail {
                *fail = false;
                return Err(StorageError::Network("connection reset".to_string()));
            }
            Ok(())
        }
    }

    fn app_with_temp_settings() -> (FaceupApp, tempfile::TempDir, egui::Context) {
        let ctx = egui::Context::default();
        let temp = tempdir().expect("tempdir");
        let settings_path = temp.path().join("faceup_settings_test.json");
        let store = DirObjectStore::new(temp.path().join("uploads"));
        let app = FaceupApp::create(
            &ctx,
            settings_path,
            Arc::new(StubDetector),
            Some(Arc::new(store)),
        );
        (app, temp, ctx)
    }

    fn select_plain_photo(app: &mut FaceupApp, width: u32, height: u32) {
        let picked = PickedImage::from_parts(width, height, b"photo-bytes".to_vec());
        app.workflow.select_image(picked);
    }

    fn next_job(app: &FaceupApp) -> JobMessage {
        app.job_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("background job result")
    }

    #[test]
    fn smoke_initializes_and_persists_settings() {
        use crate::settings::persist_settings;

        let ctx = egui::Context::default();
        let temp = tempdir().expect("tempdir");
        let settings_path = temp.path().join("config").join("faceup_settings_smoke.json");

        let mut app =
            FaceupApp::create(&ctx, settings_path.clone(), Arc::new(StubDetector), None);
        assert_eq!(app.workflow.phase(), WorkflowPhase::Idle);
        assert!(
            app.status_line.contains("Pick a photo"),
            "status line should invite selection, got {}",
            app.status_line
        );
        assert_eq!(app.settings_path, settings_path);

        app.settings.display.show_overlay = false;
        persist_settings(&app.settings, &app.settings_path).expect("persist settings");

        let saved = fs::read_to_string(&app.settings_path).expect("read settings");
        let json: serde_json::Value = serde_json::from_str(&saved).expect("parse settings");
        assert_eq!(json["display"]["show_overlay"], json!(false));
    }

    #[test]
    fn selecting_a_photo_runs_detection_end_to_end() {
        let (mut app, temp, ctx) = app_with_temp_settings();
        let photo_path = temp.path().join("photo.png");
        let payload = synthetic_photo(320, 240).expect("synthetic photo");
        fs::write(&photo_path, payload).expect("write photo");

        app.select_image_from_path(&ctx, &photo_path);
        assert!(app.preview.texture.is_some());
        assert_eq!(app.workflow.native_size(), Some((320, 240)));
        assert_eq!(app.workflow.phase(), WorkflowPhase::Detecting);

        let message = next_job(&app);
        app.handle_job_message(message);

        assert_eq!(app.workflow.phase(), WorkflowPhase::DetectionComplete);
        assert_eq!(app.workflow.face_count(), 1);
        assert!(
            app.status_line.contains("Detected 1 face(s)"),
            "got {}",
            app.status_line
        );
        assert!(app.last_error.is_none());
    }

    #[test]
    fn unreadable_photo_keeps_previous_selection() {
        let (mut app, temp, ctx) = app_with_temp_settings();
        select_plain_photo(&mut app, 64, 64);
        let kept_id = app.workflow.image_id();

        let bad_path = temp.path().join("not-an-image.png");
        fs::write(&bad_path, b"garbage").expect("write garbage");
        app.select_image_from_path(&ctx, &bad_path);

        assert_eq!(app.workflow.image_id(), kept_id);
        assert!(app.last_error.as_deref().is_some_and(|detail| {
            detail.contains("Selection error")
        }));
    }

    #[test]
    fn stale_detection_result_is_ignored_after_reselection() {
        let (mut app, _temp, _ctx) = app_with_temp_settings();
        select_plain_photo(&mut app, 64, 64);

        let session = match app.workflow.begin_detection().expect("photo selected") {
            DetectionDispatch::Started(session) => session,
            DetectionDispatch::AlreadyPending => panic!("no detection was pending"),
        };

        select_plain_photo(&mut app, 48, 48);
        let stale = session.run(&StubDetector);
        app.handle_job_message(JobMessage::DetectionFinished(stale));

        assert_eq!(app.workflow.face_count(), 0);
        assert_eq!(app.workflow.phase(), WorkflowPhase::ImageSelected);
        assert!(!app.status_line.contains("Detected"));
    }

    #[test]
    fn upload_round_trip_writes_object_under_root() {
        let (mut app, temp, _ctx) = app_with_temp_settings();
        select_plain_photo(&mut app, 32, 32);

        app.begin_upload();
        assert_eq!(app.workflow.upload_status(), UploadStatus::InProgress);
        assert_eq!(app.workflow.phase(), WorkflowPhase::Uploading);

        let message = next_job(&app);
        app.handle_job_message(message);

        let key = match app.workflow.upload_status() {
            UploadStatus::Succeeded(key) => key,
            status => panic!("expected success, got {status:?}"),
        };
        assert!(key.starts_with("images/"));
        assert!(app.status_line.contains("Uploaded"));

        let object = temp.path().join("uploads").join(&key);
        let written = fs::read(&object).expect("uploaded object on disk");
        assert_eq!(written, b"photo-bytes");
    }

    #[test]
    fn duplicate_upload_request_is_rejected_while_running() {
        let (mut app, _temp, _ctx) = app_with_temp_settings();
        select_plain_photo(&mut app, 32, 32);

        app.begin_upload();
        app.begin_upload();

        assert!(app.last_error.as_deref().is_some_and(|detail| {
            detail.contains("already in progress")
        }));
        assert_eq!(app.workflow.upload_status(), UploadStatus::InProgress);

        let message = next_job(&app);
        app.handle_job_message(message);
        assert!(matches!(
            app.workflow.upload_status(),
            UploadStatus::Succeeded(_)
        ));
    }

    #[test]
    fn failed_upload_reports_error_and_allows_retry() {
        let ctx = egui::Context::default();
        let temp = tempdir().expect("tempdir");
        let settings_path = temp.path().join("faceup_settings_test.json");
        let mut app = FaceupApp::create(
            &ctx,
            settings_path,
            Arc::new(StubDetector),
            Some(Arc::new(FlakyStore {
                fail_first: Mutex::new(true),
            })),
        );
        select_plain_photo(&mut app, 32, 32);

        app.begin_upload();
        let message = next_job(&app);
        app.handle_job_message(message);

        assert!(matches!(
            app.workflow.upload_status(),
            UploadStatus::Failed(_)
        ));
        assert!(app.last_error.as_deref().is_some_and(|detail| {
            detail.contains("Upload error")
        }));

        app.begin_upload();
        let message = next_job(&app);
        app.handle_job_message(message);
        assert!(matches!(
            app.workflow.upload_status(),
            UploadStatus::Succeeded(_)
        ));
        assert!(app.last_error.is_none());
    }

    #[test]
    fn overlay_toggle_persists_preference() {
        let (mut app, _temp, _ctx) = app_with_temp_settings();
        assert!(app.settings.display.show_overlay);

        app.toggle_overlay();
        assert!(!app.settings.display.show_overlay);

        let saved = fs::read_to_string(&app.settings_path).expect("read settings");
        let json: serde_json::Value = serde_json::from_str(&saved).expect("parse settings");
        assert_eq!(json["display"]["show_overlay"], json!(false));

        app.toggle_overlay();
        assert!(app.settings.display.show_overlay);
    }
}
