//! Palette loading from TOML files.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lunar_core::{Color, PaletteIndex};
use serde::Deserialize;

use crate::Palette;

/// Color representation in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    /// `"#rrggbb"`, `"#rrggbbaa"` or a basic color name.
    Named(String),
    Rgb { rgb: [u8; 3] },
    Rgba { rgba: [u8; 4] },
}

impl TomlColor {
    fn to_color(&self) -> Result<Color> {
        match self {
            TomlColor::Named(name) => parse_named(name),
            TomlColor::Rgb { rgb } => Ok(Color::rgb(rgb[0], rgb[1], rgb[2])),
            TomlColor::Rgba { rgba } => Ok(Color::rgba(rgba[0], rgba[1], rgba[2], rgba[3])),
        }
    }
}

fn parse_named(name: &str) -> Result<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        let channel = |i: usize| -> Result<u8> {
            let digits = hex.get(i..i + 2).context("truncated hex color")?;
            u8::from_str_radix(digits, 16).with_context(|| format!("invalid hex color '{}'", name))
        };
        return match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => bail!("hex color '{}' must have 6 or 8 digits", name),
        };
    }

    match name.to_lowercase().as_str() {
        "black" => Ok(Color::BLACK),
        "white" => Ok(Color::WHITE),
        "red" => Ok(Color::rgb(205, 49, 49)),
        "green" => Ok(Color::rgb(13, 188, 121)),
        "yellow" => Ok(Color::rgb(229, 229, 16)),
        "blue" => Ok(Color::rgb(36, 114, 200)),
        "magenta" => Ok(Color::rgb(188, 63, 188)),
        "cyan" => Ok(Color::rgb(17, 168, 205)),
        "gray" | "grey" => Ok(Color::rgb(128, 128, 128)),
        "transparent" => Ok(Color::rgba(0, 0, 0, 0)),
        _ => bail!("unknown color name '{}'", name),
    }
}

/// TOML palette structure.
#[derive(Debug, Clone, Deserialize)]
struct TomlPalette {
    name: String,
    #[serde(default)]
    colors: HashMap<String, TomlColor>,
}

/// Load palette from TOML file.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme {}", path.display()))?;
    load_palette_from_str(&content)
        .with_context(|| format!("Failed to parse theme {}", path.display()))
}

/// Load palette from TOML string.
///
/// Slots missing from the file keep the fallback palette's color; unknown
/// keys are reported and ignored.
pub fn load_palette_from_str(content: &str) -> Result<Palette> {
    let toml_palette: TomlPalette = toml::from_str(content)?;

    let mut palette = Palette::fallback();
    palette.name = toml_palette.name;

    for (key, value) in &toml_palette.colors {
        match PaletteIndex::ALL.iter().find(|index| index.key() == key) {
            Some(index) => {
                let color = value
                    .to_color()
                    .with_context(|| format!("in color '{}'", key))?;
                palette.set(*index, color);
            }
            None => log::warn!("Theme '{}': unknown color key '{}'", palette.name, key),
        }
    }

    Ok(palette)
}
