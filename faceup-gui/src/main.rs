//! Desktop GUI for the faceup photo workflow.

use eframe::NativeOptions;
use faceup_gui::FaceupApp;
use faceup_utils::init_logging;

/// Main entry point for the GUI application.
fn main() -> eframe::Result<()> {
    init_logging(log::LevelFilter::Info).expect("failed to initialize logging");
    log::info!("Faceup {} starting", faceup_core::version());

    let mut options = NativeOptions::default();

    // Set initial window size to avoid scrunched UI on first launch
    options.viewport = options.viewport.with_inner_size([1080.0, 760.0]);

    eframe::run_native(
        "Faceup",
        options,
        Box::new(|cc| Ok(Box::new(FaceupApp::new(cc)))),
    )
}
