//! Language rule sets.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use lunar_core::PaletteIndex;

/// A token recognised at the start of the tokenizer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Length in bytes.
    pub len: usize,
    pub color: PaletteIndex,
}

/// Signature of a callback tokenizer: inspect the bytes starting at the
/// current position and either claim a token or decline with `None`.
pub type TokenizeFn = dyn Fn(&[u8]) -> Option<Token> + Send + Sync;

/// Optional callback consulted before the regex rules.
#[derive(Clone, Default)]
pub enum Tokenizer {
    #[default]
    None,
    Custom(Arc<TokenizeFn>),
}

impl Tokenizer {
    pub fn custom(f: impl Fn(&[u8]) -> Option<Token> + Send + Sync + 'static) -> Self {
        Tokenizer::Custom(Arc::new(f))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Tokenizer::Custom(_))
    }

    pub fn tokenize(&self, input: &[u8]) -> Option<Token> {
        match self {
            Tokenizer::None => None,
            Tokenizer::Custom(f) => f(input),
        }
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokenizer::None => f.write_str("Tokenizer::None"),
            Tokenizer::Custom(_) => f.write_str("Tokenizer::Custom(..)"),
        }
    }
}

/// Keywords, comment markers and token rules for one language.
///
/// Built once at startup and handed to the editor; the editor compiles the
/// regex rules when the definition is installed.
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    pub name: String,
    /// First keyword tier, painted as [`PaletteIndex::PurpleKeyword`].
    pub purple_keywords: HashSet<String>,
    /// Second keyword tier, painted as [`PaletteIndex::BlueKeyword`].
    pub blue_keywords: HashSet<String>,
    pub known_functions: HashSet<String>,
    pub comment_start: String,
    pub comment_end: String,
    pub single_line_comment: String,
    pub case_sensitive: bool,
    pub auto_indentation: bool,
    pub tokenizer: Tokenizer,
    /// Regex fallback rules, tried in order, anchored at the current position.
    pub token_rules: Vec<(String, PaletteIndex)>,
}

impl Default for LanguageDefinition {
    fn default() -> Self {
        Self::plain_text()
    }
}

impl LanguageDefinition {
    /// No keywords, no comments, no rules: every glyph stays `Default`.
    pub fn plain_text() -> Self {
        Self {
            name: "text".to_string(),
            purple_keywords: HashSet::new(),
            blue_keywords: HashSet::new(),
            known_functions: HashSet::new(),
            comment_start: String::new(),
            comment_end: String::new(),
            single_line_comment: String::new(),
            case_sensitive: true,
            auto_indentation: true,
            tokenizer: Tokenizer::None,
            token_rules: Vec::new(),
        }
    }

    /// Built-in definition by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "lua" => Some(Self::lua()),
            "c" => Some(Self::c_style()),
            "text" => Some(Self::plain_text()),
            _ => None,
        }
    }

    /// Returns `true` if the definition colors anything at all.
    pub fn has_syntax(&self) -> bool {
        self.tokenizer.is_custom() || !self.token_rules.is_empty()
    }
}

pub(crate) fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_has_no_syntax() {
        let def = LanguageDefinition::default();
        assert_eq!(def.name, "text");
        assert!(!def.has_syntax());
    }

    #[test]
    fn test_custom_tokenizer_is_called() {
        let tokenizer = Tokenizer::custom(|input| {
            (input.first() == Some(&b'@')).then_some(Token {
                len: 1,
                color: PaletteIndex::Punctuation,
            })
        });
        assert!(tokenizer.is_custom());
        assert_eq!(
            tokenizer.tokenize(b"@x"),
            Some(Token {
                len: 1,
                color: PaletteIndex::Punctuation
            })
        );
        assert_eq!(tokenizer.tokenize(b"x"), None);
        assert_eq!(Tokenizer::None.tokenize(b"@"), None);
    }
}
