//! Settings loading and persistence for the GUI shell.

use std::{fs, path::Path};

use anyhow::{Context as AnyhowContext, Result};
use faceup_utils::config::AppSettings;
use log::warn;

/// Read settings from `path`, falling back to defaults when that fails.
///
/// A missing file is the normal first-launch path and stays silent; an
/// unreadable or unparsable file is logged and ignored.
pub fn load_settings(path: &Path) -> AppSettings {
    if !path.exists() {
        return AppSettings::default();
    }
    AppSettings::load_from_path(path).unwrap_or_else(|err| {
        warn!(
            "Ignoring unreadable settings at {}: {err:#}",
            path.display()
        );
        AppSettings::default()
    })
}

/// Write settings to `path`, creating the parent directory when needed.
pub fn persist_settings(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.exists()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    settings.save_to_path(path)
}

/// Persist and translate the failure into a status-line message.
pub fn persist_settings_with_feedback(settings: &AppSettings, path: &Path) -> Result<(), String> {
    persist_settings(settings, path).map_err(|err| {
        let message = format!("Failed to persist settings: {err:#}");
        warn!("{message}");
        message
    })
}
