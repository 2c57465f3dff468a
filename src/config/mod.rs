// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Playback preferences that change on every session (volume, playlist, resume
//! position) are not stored here; see [`crate::app::preferences`].
//!
//! # Examples
//!
//! ```no_run
//! use reel_player::config::{self, Config};
//! use std::path::Path;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save_to_path(&config, Path::new("settings.toml")).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::ui::state::OverlayTimeout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub skip_step_secs: Option<f64>,
    #[serde(default)]
    pub volume_step: Option<f32>,
    #[serde(default)]
    pub controls_hide_delay_secs: Option<u32>,
    #[serde(default)]
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            skip_step_secs: Some(DEFAULT_SKIP_STEP_SECS),
            volume_step: Some(VOLUME_STEP),
            controls_hide_delay_secs: Some(DEFAULT_OVERLAY_TIMEOUT_SECS),
            screenshot_dir: None,
        }
    }
}

impl Config {
    /// Seconds skipped by the Left/Right shortcuts.
    #[must_use]
    pub fn skip_step(&self) -> f64 {
        self.skip_step_secs
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SKIP_STEP_SECS)
    }

    /// Volume change applied by the Up/Down shortcuts.
    #[must_use]
    pub fn volume_step(&self) -> f32 {
        self.volume_step
            .filter(|s| s.is_finite() && *s > 0.0)
            .map_or(VOLUME_STEP, |s| s.min(MAX_VOLUME))
    }

    /// Inactivity delay before the control bar hides while playing.
    #[must_use]
    pub fn controls_hide_delay(&self) -> OverlayTimeout {
        self.controls_hide_delay_secs
            .map(OverlayTimeout::new)
            .unwrap_or_default()
    }

    /// Directory receiving downloaded screenshots.
    ///
    /// Falls back to the platform download directory, then the working directory.
    #[must_use]
    pub fn screenshot_dir(&self) -> PathBuf {
        self.screenshot_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            language: Some("fr".to_string()),
            skip_step_secs: Some(5.0),
            volume_step: Some(0.1),
            controls_hide_delay_secs: Some(7),
            screenshot_dir: Some(PathBuf::from("/tmp/shots")),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
        assert_eq!(loaded.skip_step(), DEFAULT_SKIP_STEP_SECS);
    }

    #[test]
    fn load_from_missing_file_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn partial_file_keeps_missing_fields_empty() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "language = \"fr\"\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.language.as_deref(), Some("fr"));
        assert_eq!(loaded.skip_step_secs, None);
        assert_eq!(loaded.skip_step(), DEFAULT_SKIP_STEP_SECS);
        assert_eq!(loaded.controls_hide_delay().value(), DEFAULT_OVERLAY_TIMEOUT_SECS);
    }

    #[test]
    fn accessors_reject_nonsensical_values() {
        let config = Config {
            skip_step_secs: Some(-3.0),
            volume_step: Some(f32::NAN),
            controls_hide_delay_secs: Some(500),
            ..Config::default()
        };
        assert_eq!(config.skip_step(), DEFAULT_SKIP_STEP_SECS);
        assert_eq!(config.volume_step(), VOLUME_STEP);
        assert_eq!(config.controls_hide_delay().value(), MAX_OVERLAY_TIMEOUT_SECS);
    }

    #[test]
    fn explicit_screenshot_dir_wins() {
        let config = Config {
            screenshot_dir: Some(PathBuf::from("/srv/captures")),
            ..Config::default()
        };
        assert_eq!(config.screenshot_dir(), PathBuf::from("/srv/captures"));
    }
}
