//! Configuration management for lunar.
//!
//! This crate provides configuration loading and saving with support for
//! TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, LoggingSettings};
pub use xdg::{get_cache_dir, get_config_dir, get_themes_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "default";
    pub const LANGUAGE: &str = "lua";
    pub const LINE_SPACING: f32 = 1.0;
    pub const CURSOR_BLINK_MS: u64 = 400;
    pub const DOUBLE_CLICK_MS: u64 = 500;
    pub const UNDO_LIMIT: usize = 0;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        let config = Self::load_from(&config_path)?;
        Self::ensure_themes_dir()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is created with default values. Missing keys are
    /// completed with defaults and the file is rewritten when that changes it.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&original_content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path to themes directory.
    pub fn get_themes_dir() -> Result<PathBuf> {
        xdg::get_themes_dir()
    }

    /// Log file path from settings, or `<cache dir>/lunar.log`.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(get_cache_dir()?.join("lunar.log")),
        }
    }

    /// Ensure themes directory exists.
    fn ensure_themes_dir() -> Result<()> {
        let themes_dir = Self::get_themes_dir()?;
        if !themes_dir.exists() {
            std::fs::create_dir_all(themes_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(config.editor.cursor_blink_ms, 400);
        assert_eq!(config.editor.undo_limit, 0);
    }

    #[test]
    fn test_missing_keys_are_completed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor]\ntheme = \"light\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.editor.theme, "light");
        assert_eq!(config.editor.language, "lua");
        assert_eq!(config.logging.min_level, "info");

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("double_click_ms"));
        assert!(rewritten.contains("[logging]"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.editor.read_only = true;
        config.logging.file_path = Some("/tmp/x.log".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.log_file_path().unwrap(), PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
