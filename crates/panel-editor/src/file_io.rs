//! Script file loading and saving.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

const MEGABYTE: u64 = 1024 * 1024;

/// Largest script the editor panel opens (16 MB).
pub(crate) const MAX_SCRIPT_SIZE: u64 = 16 * MEGABYTE;

/// Read a script as text, rejecting oversized files.
///
/// Invalid UTF-8 is replaced rather than refused.
pub(crate) fn read_script(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?;
    if !metadata.is_file() {
        bail!("{} is not a regular file", path.display());
    }
    if metadata.len() > MAX_SCRIPT_SIZE {
        bail!(
            "File is too large to open ({:.1} MB). Maximum allowed size is {} MB.",
            metadata.len() as f64 / MEGABYTE as f64,
            MAX_SCRIPT_SIZE / MEGABYTE
        );
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("{} is not valid UTF-8, replacing bad sequences", path.display());
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}

/// Write `text` to `path`, creating parent directories as needed.
pub(crate) fn write_script(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

/// Check if file is read-only.
pub(crate) fn is_file_readonly(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.permissions().readonly())
        .unwrap_or(false)
}

/// Extract filename from path for title display.
pub(crate) fn path_to_title(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Untitled".to_string())
}
