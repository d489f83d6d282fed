//! The persisted settings record.
//!
//! All fields use `serde(default)` so partial files work correctly, and
//! every user-visible change rewrites the whole file.

use std::path::{Path, PathBuf};

use evo_common::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// User settings, read once at startup and overwritten wholesale on each
/// user-facing change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model identifier passed through to the session, opaque here.
    pub model: String,
    /// Custom role text; empty means "use the active mode's preset".
    pub role: String,
    /// "dark" or "light".
    pub theme: String,
    /// Whether replies are spoken aloud (used by voice-capable frontends).
    pub speak_enabled: bool,
    /// Text-to-speech rate (words per minute).
    pub tts_rate: u32,
    /// Auto-send transcribed voice input.
    pub mic_auto_send: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            role: String::new(),
            theme: "dark".to_string(),
            speak_enabled: true,
            tts_rate: 175,
            mic_auto_send: true,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. A missing or unreadable or corrupt
    /// file yields defaults; corruption is logged, never fatal.
    pub fn load_from_path(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("failed to read settings from {}: {e}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => {
                info!("loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("corrupt settings file {}, using defaults: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to a specific path, atomically (write to `.tmp`,
    /// then rename). Creates parent directories if needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("failed to serialize settings: {e}")))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::WriteError(format!(
                    "failed to create settings directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| {
            ConfigError::WriteError(format!(
                "failed to write settings to {}: {e}",
                tmp_path.display()
            ))
        })?;

        if let Err(e) = std::fs::rename(&tmp_path, path) {
            // Rename failed, try direct write as fallback (Windows compat)
            warn!("atomic rename failed ({e}), falling back to direct write");
            std::fs::write(path, &json).map_err(|e2| {
                ConfigError::WriteError(format!(
                    "failed to write settings to {}: {e2}",
                    path.display()
                ))
            })?;
        }

        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

/// Platform-specific default settings path.
///
/// On macOS: `~/Library/Application Support/evo/settings.json`
/// On Linux: `~/.config/evo/settings.json`
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("evo").join("settings.json"))
}
