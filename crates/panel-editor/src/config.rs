//! Editor configuration.

use lunar_config::EditorSettings;

/// Per-instance editor behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Line height multiplier applied to the host's line height
    pub line_spacing: f32,
    /// Cursor blink half-period in milliseconds
    pub cursor_blink_ms: u64,
    /// Maximum undo records kept (0 = unlimited)
    pub undo_limit: usize,
    /// Ignore every mutating command
    pub read_only: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

impl EditorConfig {
    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            line_spacing: settings.line_spacing.max(0.1),
            cursor_blink_ms: settings.cursor_blink_ms.max(1),
            undo_limit: settings.undo_limit,
            read_only: settings.read_only,
        }
    }

    /// Read-only viewer configuration.
    pub fn view_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }
}
