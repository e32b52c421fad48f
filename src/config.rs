//! User settings, stored as JSON in the platform config directory.
//!
//! A missing or malformed file is never an error: the defaults are used and
//! the problem is logged.

use crate::cleaner::{DEFAULT_ZSCORE_THRESHOLD, InferenceSettings};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Rows shown in previews and JSON responses (default: 10)
    pub preview_row_limit: usize,
    /// Z-score threshold used when a request does not set one
    pub zscore_threshold: f64,
    pub inference: InferenceSettings,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            preview_row_limit: 10,
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
            inference: InferenceSettings::default(),
            log_level: "info".to_owned(),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    crate::utils::standard_paths().config_dir.join("config.json")
}

pub fn load_app_config() -> AppSettings {
    load_app_config_from(&get_config_path())
}

/// Read settings from `path`. `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid settings JSON.
pub fn read_app_config(path: &Path) -> Result<Option<AppSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(Some(settings))
}

pub fn load_app_config_from(path: &Path) -> AppSettings {
    match read_app_config(path) {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable config: {e:#}, using defaults");
            AppSettings::default()
        }
    }
}

pub fn save_app_config(settings: &AppSettings) -> Result<()> {
    save_app_config_to(settings, &get_config_path())
}

pub fn save_app_config_to(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_app_config_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.preview_row_limit, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"zscore_threshold": 2.5, "inference": {"categorical_min_rows": 4}}"#)
            .expect("write");
        let settings = load_app_config_from(&path);
        assert_eq!(settings.zscore_threshold, 2.5);
        assert_eq!(settings.inference.categorical_min_rows, 4);
        assert_eq!(settings.inference.categorical_max_levels, 100);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").expect("write");
        assert_eq!(load_app_config_from(&path), AppSettings::default());
    }

    #[test]
    fn test_read_reports_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        assert!(read_app_config(&path).expect("missing is fine").is_none());

        std::fs::write(&path, "[1, 2]").expect("write");
        let err = read_app_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");
        let settings = AppSettings {
            preview_row_limit: 25,
            ..Default::default()
        };
        save_app_config_to(&settings, &path).expect("save");
        assert_eq!(load_app_config_from(&path), settings);
    }
}
