//! Background execution of detection and upload sessions.
//!
//! Sessions run on the rayon pool and report back over the app's channel.
//! The worker never touches application state; results re-enter through
//! `Workflow::apply_*` on the UI thread, where the identity gate decides
//! whether they still matter.

use std::sync::{Arc, mpsc};

use faceup_core::{DetectionSession, FaceDetector, ObjectStore, UploadSession};
use faceup_utils::timing_guard;
use log::{Level, error, info};

use crate::types::JobMessage;

/// Runs a detection session on the worker pool.
pub fn start_detection(
    session: DetectionSession,
    detector: Arc<dyn FaceDetector>,
    job_tx: mpsc::Sender<JobMessage>,
) {
    info!("Launching detection job for {}", session.image_id());

    rayon::spawn(move || {
        let _timing = timing_guard("detect_faces", Level::Debug);
        let id = session.image_id();
        let update = session.run(detector.as_ref());
        if job_tx.send(JobMessage::DetectionFinished(update)).is_err() {
            error!("GUI dropped detection result for {id}");
        }
    });
}

/// Runs an upload session on the worker pool.
pub fn start_upload(
    session: UploadSession,
    store: Arc<dyn ObjectStore>,
    job_tx: mpsc::Sender<JobMessage>,
) {
    info!(
        "Launching upload job for {} (key {})",
        session.image_id(),
        session.key()
    );

    rayon::spawn(move || {
        let _timing = timing_guard("put_object", Level::Debug);
        let id = session.image_id();
        let update = session.run(store.as_ref());
        if job_tx.send(JobMessage::UploadFinished(update)).is_err() {
            error!("GUI dropped upload result for {id}");
        }
    });
}
