//! Shared configuration types consumed across the faceup workspace.
//!
//! These structures provide a common representation for detector, display, storage,
//! and telemetry preferences that can be serialized to disk and reused by the GUI
//! front end and by tests.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Performance/accuracy trade-off requested from the detection capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceMode {
    /// Favor latency over exhaustive detection (default).
    #[default]
    Fast,
    /// Favor detection quality at higher latency.
    Accurate,
}

impl PerformanceMode {
    pub fn as_label(self) -> &'static str {
        match self {
            PerformanceMode::Fast => "Fast",
            PerformanceMode::Accurate => "Accurate",
        }
    }
}

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PerformanceMode::Fast => "fast",
                PerformanceMode::Accurate => "accurate",
            }
        )
    }
}

impl FromStr for PerformanceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(PerformanceMode::Fast),
            "accurate" => Ok(PerformanceMode::Accurate),
            other => Err(format!(
                "invalid performance mode '{other}'; expected 'fast' or 'accurate'"
            )),
        }
    }
}

/// Parameters forwarded to the detection capability.
///
/// The workflow requests fast, boxes-only output: no landmarks and no expression
/// classification unless a front end opts in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorSettings {
    /// Performance/accuracy mode passed through to the detector.
    pub performance: PerformanceMode,
    /// Request facial landmark output.
    pub landmarks: bool,
    /// Request expression classification output.
    pub classification: bool,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            performance: PerformanceMode::Fast,
            landmarks: false,
            classification: false,
        }
    }
}

/// Preview rendering preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Scaling policy for the preview: "fit", "stretch", or "fill".
    pub scaling: String,
    /// Draw detected face rectangles over the preview.
    pub show_overlay: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scaling: "fit".to_string(),
            show_overlay: true,
        }
    }
}

impl DisplaySettings {
    /// Normalize the scaling string, falling back to "fit" for unknown values.
    pub fn sanitize(&mut self) {
        let normalized = self.scaling.trim().to_ascii_lowercase();
        self.scaling = match normalized.as_str() {
            "fit" | "stretch" | "fill" => normalized,
            _ => "fit".to_string(),
        };
    }
}

/// Local object-store backing for uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory of the directory-backed object store.
    pub root: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: "uploads".to_string(),
        }
    }
}

/// Settings controlling optional runtime telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Whether telemetry timing logs are enabled.
    pub enabled: bool,
    /// Logging level for telemetry output (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "debug".to_string(),
        }
    }
}

impl TelemetrySettings {
    /// Resolve the configured level string into a `LevelFilter`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Debug,
        }
    }
}

/// Persistent application settings consumed by the GUI front end.
///
/// This struct aggregates all user-configurable parameters, allowing them to be
/// loaded from and saved to a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    /// Parameters forwarded to the detection capability.
    pub detector: DetectorSettings,
    /// Preview rendering preferences.
    pub display: DisplaySettings,
    /// Object-store backing for uploads.
    pub storage: StorageSettings,
    /// Telemetry and diagnostics preferences.
    pub telemetry: TelemetrySettings,
}

impl AppSettings {
    /// Load settings from a JSON file.
    ///
    /// If the file does not exist or cannot be parsed, an error is returned.
    /// Unknown scaling values are normalized back to the default.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let mut settings: AppSettings = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings JSON at {}", path.display()))?;

        settings.display.sanitize();

        Ok(settings)
    }

    /// Serialize settings to disk in pretty-printed JSON.
    ///
    /// This will overwrite the file if it already exists.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let payload =
            serde_json::to_string_pretty(self).context("failed to serialize settings JSON")?;
        fs::write(path, payload)
            .with_context(|| format!("failed to write settings file {}", path.display()))?;
        Ok(())
    }
}

/// Returns the default path for persisted application settings (`config/faceup_settings.json`).
pub fn default_settings_path() -> PathBuf {
    env::current_dir()
        .map(|dir| dir.join("config/faceup_settings.json"))
        .unwrap_or_else(|_| PathBuf::from("config/faceup_settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn default_settings_round_trip() {
        let file = NamedTempFile::new().expect("tempfile");
        let settings = AppSettings::default();
        settings.save_to_path(file.path()).expect("save");

        let loaded = AppSettings::load_from_path(file.path()).expect("load");
        assert_eq!(loaded.detector, settings.detector);
        assert_eq!(loaded.display, settings.display);
        assert_eq!(loaded.storage.root, settings.storage.root);
        assert_eq!(loaded.telemetry.enabled, settings.telemetry.enabled);
        assert_eq!(loaded.telemetry.level, settings.telemetry.level);
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let file = NamedTempFile::new().expect("tempfile");
        let json = r#"{
            "detector": { "performance": "accurate" },
            "display": { "scaling": "diagonal" }
        }"#;
        fs::write(file.path(), json).expect("write custom settings");

        let loaded = AppSettings::load_from_path(file.path()).expect("load");
        assert_eq!(loaded.detector.performance, PerformanceMode::Accurate);
        assert!(!loaded.detector.landmarks);
        assert!(!loaded.detector.classification);
        assert_eq!(loaded.display.scaling, "fit");
        assert!(loaded.display.show_overlay);
        assert_eq!(loaded.storage.root, "uploads");
        assert!(!loaded.telemetry.enabled);
        assert_eq!(loaded.telemetry.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn telemetry_level_parses_variants() {
        let telemetry = TelemetrySettings {
            level: "TRACE".into(),
            ..TelemetrySettings::default()
        };
        assert_eq!(telemetry.level_filter(), LevelFilter::Trace);

        let telemetry = TelemetrySettings {
            level: "Warn".into(),
            ..TelemetrySettings::default()
        };
        assert_eq!(telemetry.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn performance_mode_parses_and_rejects() {
        assert_eq!(
            " Accurate ".parse::<PerformanceMode>(),
            Ok(PerformanceMode::Accurate)
        );
        assert_eq!("fast".parse::<PerformanceMode>(), Ok(PerformanceMode::Fast));
        assert!("turbo".parse::<PerformanceMode>().is_err());
    }

    #[test]
    fn sanitize_normalizes_scaling() {
        let mut display = DisplaySettings {
            scaling: " Stretch ".to_string(),
            show_overlay: true,
        };
        display.sanitize();
        assert_eq!(display.scaling, "stretch");

        display.scaling = "mosaic".to_string();
        display.sanitize();
        assert_eq!(display.scaling, "fit");
    }
}
