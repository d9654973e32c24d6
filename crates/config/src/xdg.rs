//! Per-user directories, resolved with `dirs`.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "lunar";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

/// `$XDG_CONFIG_HOME/lunar`; holds `config.toml` and `themes/`.
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// `$XDG_CACHE_HOME/lunar`; holds the default log file.
pub fn get_cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}

/// User theme files, one `<name>.toml` per palette.
pub fn get_themes_dir() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("themes"))
}
