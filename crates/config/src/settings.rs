//! Configuration structures for lunar settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Language definition used when the file type is unknown (lua, c, text)
    #[serde(default = "default_language")]
    pub language: String,

    /// Line height multiplier
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,

    /// Cursor blink half-period in milliseconds
    #[serde(default = "default_cursor_blink_ms")]
    pub cursor_blink_ms: u64,

    /// Double-click threshold in milliseconds, used when the host has none
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,

    /// Maximum undo records kept (0 = unlimited)
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// Open files without allowing edits
    #[serde(default)]
    pub read_only: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Size of the in-memory log ring
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_language() -> String {
    defaults::LANGUAGE.to_string()
}

fn default_line_spacing() -> f32 {
    defaults::LINE_SPACING
}

fn default_cursor_blink_ms() -> u64 {
    defaults::CURSOR_BLINK_MS
}

fn default_double_click_ms() -> u64 {
    defaults::DOUBLE_CLICK_MS
}

fn default_undo_limit() -> usize {
    defaults::UNDO_LIMIT
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

// Default implementations
impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            language: default_language(),
            line_spacing: default_line_spacing(),
            cursor_blink_ms: default_cursor_blink_ms(),
            double_click_ms: default_double_click_ms(),
            undo_limit: default_undo_limit(),
            read_only: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
