//! Palette system for lunar.
//!
//! Provides the editor color table with support for custom TOML themes.

mod loader;
mod palette;

pub use loader::{load_palette, load_palette_from_str};
pub use palette::Palette;

use std::path::Path;

// Embed theme files at compile time
const THEME_DEFAULT_TOML: &str = include_str!("../themes/default.toml");
const THEME_LIGHT_TOML: &str = include_str!("../themes/light.toml");

/// Load palette from embedded TOML content.
fn load_builtin(content: &str, name: &str) -> Palette {
    match load_palette_from_str(content) {
        Ok(palette) => palette,
        Err(e) => {
            log::error!(
                "Failed to parse built-in theme '{}': {}. Using fallback palette.",
                name,
                e
            );
            Palette::fallback()
        }
    }
}

impl Palette {
    /// Built-in palette by name.
    pub fn builtin(name: &str) -> Option<Palette> {
        match name {
            "default" => Some(load_builtin(THEME_DEFAULT_TOML, "default")),
            "light" => Some(load_builtin(THEME_LIGHT_TOML, "light")),
            _ => None,
        }
    }

    /// Get palette by name.
    ///
    /// First tries `<themes_dir>/<name>.toml`, then the built-in palettes,
    /// and finally falls back to `default`.
    pub fn get_by_name(name: &str, themes_dir: Option<&Path>) -> Palette {
        if let Some(dir) = themes_dir {
            let path = dir.join(format!("{}.toml", name));
            if path.exists() {
                match load_palette(&path) {
                    Ok(palette) => return palette,
                    Err(e) => log::warn!("{:#}", e),
                }
            }
        }

        Self::builtin(name).unwrap_or_else(|| {
            log::warn!("Unknown theme '{}', using default", name);
            load_builtin(THEME_DEFAULT_TOML, "default")
        })
    }

    /// Get list of all built-in theme names.
    pub fn all_theme_names() -> &'static [&'static str] {
        &["default", "light"]
    }
}
