//! Incremental syntax coloring for lunar.
//!
//! A [`LanguageDefinition`] describes keywords, comment markers and either a
//! callback tokenizer or an ordered list of regex rules. The [`Colorizer`]
//! tags buffer glyphs with palette categories a few lines per frame.

mod c_style;
mod colorizer;
mod language;
mod lua;

pub use c_style::tokenize_c_style;
pub use colorizer::Colorizer;
pub use language::{LanguageDefinition, Token, TokenizeFn, Tokenizer};

use std::path::Path;

/// Detect language from file extension.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;

    match ext.to_lowercase().as_str() {
        "lua" => Some("lua"),
        "c" | "h" | "cpp" | "cc" | "cxx" | "hpp" | "hxx" => Some("c"),
        _ => None,
    }
}

/// Supported languages list.
pub const SUPPORTED_LANGUAGES: &[&str] = &["lua", "c", "text"];

/// Check if language is supported.
pub fn is_language_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}
