//! Evo settings.
//!
//! JSON-based persisted settings with full defaults: a missing or corrupt
//! settings file is never fatal, it just yields defaults. Writes are
//! wholesale and atomic.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use evo_config::{load_settings, save_settings};
//!
//! let mut settings = load_settings();
//! settings.theme = "light".to_string();
//! save_settings(&settings).expect("failed to save settings");
//! ```

pub mod modes;
pub mod settings;

pub use modes::{mode_instruction, mode_names};
pub use settings::{default_settings_path, Settings};

use evo_common::ConfigError;

/// Load settings from the platform default path. Falls back to defaults
/// when the path cannot be determined.
pub fn load_settings() -> Settings {
    match default_settings_path() {
        Ok(path) => Settings::load_from_path(&path),
        Err(e) => {
            tracing::warn!("settings path unavailable, using defaults: {e}");
            Settings::default()
        }
    }
}

/// Write settings wholesale to the platform default path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    let path = default_settings_path()?;
    settings.save_to_path(&path)
}
