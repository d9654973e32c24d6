//! Hand-written tokenizer for C-like syntax.
//!
//! Much faster than the regex rules, so the colorizer processes whole dirty
//! ranges in one frame when a definition uses it.

use lunar_core::PaletteIndex;

use crate::language::word_set;
use crate::{LanguageDefinition, Token, Tokenizer};

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `"..."` with `\"` escapes. Unterminated strings are declined.
fn string_literal(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'"') {
        return None;
    }
    let mut p = 1;
    while p < input.len() {
        if input[p] == b'"' {
            return Some(p + 1);
        }
        if input[p] == b'\\' && input.get(p + 1) == Some(&b'"') {
            p += 1;
        }
        p += 1;
    }
    None
}

/// `'x'` or `'\x'`.
fn char_literal(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'\'') {
        return None;
    }
    let mut p = 1;
    if input.get(p) == Some(&b'\\') {
        p += 1;
    }
    if p < input.len() {
        p += 1;
    }
    (input.get(p) == Some(&b'\'')).then_some(p + 1)
}

fn identifier(input: &[u8]) -> Option<usize> {
    if !input.first().copied().is_some_and(is_ident_start) {
        return None;
    }
    let len = 1 + input[1..].iter().take_while(|&&b| is_ident_char(b)).count();
    Some(len)
}

/// Decimal, float, hex (`0x`) and binary (`0b`) literals with C suffixes.
fn number(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    let starts_with_digit = first.is_ascii_digit();
    if first != b'+' && first != b'-' && !starts_with_digit {
        return None;
    }

    let at = |p: usize| input.get(p).copied();
    let mut p = 1;
    let mut has_digits = starts_with_digit;
    while at(p).is_some_and(|b| b.is_ascii_digit()) {
        has_digits = true;
        p += 1;
    }
    if !has_digits {
        return None;
    }

    let mut is_float = false;
    let mut is_hex = false;
    let mut is_binary = false;

    match at(p) {
        Some(b'.') => {
            is_float = true;
            p += 1;
            while at(p).is_some_and(|b| b.is_ascii_digit()) {
                p += 1;
            }
        }
        Some(b'x' | b'X') => {
            is_hex = true;
            p += 1;
            while at(p).is_some_and(|b| b.is_ascii_hexdigit()) {
                p += 1;
            }
        }
        Some(b'b' | b'B') => {
            is_binary = true;
            p += 1;
            while at(p).is_some_and(|b| b == b'0' || b == b'1') {
                p += 1;
            }
        }
        _ => {}
    }

    if !is_hex && !is_binary {
        if matches!(at(p), Some(b'e' | b'E')) {
            is_float = true;
            p += 1;
            if matches!(at(p), Some(b'+' | b'-')) {
                p += 1;
            }
            let digits_start = p;
            while at(p).is_some_and(|b| b.is_ascii_digit()) {
                p += 1;
            }
            if p == digits_start {
                return None;
            }
        }
        if at(p) == Some(b'f') {
            p += 1;
        }
    }

    if !is_float {
        while matches!(at(p), Some(b'u' | b'U' | b'l' | b'L')) {
            p += 1;
        }
    }

    Some(p)
}

fn punctuation(input: &[u8]) -> Option<usize> {
    match input.first()? {
        b'[' | b']' | b'{' | b'}' | b'!' | b'%' | b'^' | b'&' | b'*' | b'(' | b')' | b'-'
        | b'+' | b'=' | b'~' | b'|' | b'<' | b'>' | b'?' | b':' | b'/' | b';' | b',' | b'.' => {
            Some(1)
        }
        _ => None,
    }
}

/// Tokenize one C-style token at the start of `input`.
///
/// Whitespace and unknown bytes are declined so the colorizer advances past
/// them with the default color.
pub fn tokenize_c_style(input: &[u8]) -> Option<Token> {
    let token = |len, color| Some(Token { len, color });

    if let Some(len) = string_literal(input) {
        return token(len, PaletteIndex::String);
    }
    if let Some(len) = char_literal(input) {
        return token(len, PaletteIndex::CharLiteral);
    }
    if let Some(len) = identifier(input) {
        return token(len, PaletteIndex::Identifier);
    }
    if let Some(len) = number(input) {
        return token(len, PaletteIndex::Number);
    }
    if let Some(len) = punctuation(input) {
        return token(len, PaletteIndex::Punctuation);
    }
    None
}

impl LanguageDefinition {
    /// C, colored by the callback tokenizer.
    pub fn c_style() -> Self {
        Self {
            name: "c".to_string(),
            purple_keywords: word_set(&[
                "auto", "break", "case", "const", "continue", "default", "do", "else", "enum",
                "extern", "for", "goto", "if", "inline", "register", "restrict", "return",
                "sizeof", "static", "struct", "switch", "typedef", "union", "volatile", "while",
            ]),
            blue_keywords: word_set(&[
                "char", "double", "float", "int", "long", "short", "signed", "unsigned", "void",
                "bool", "true", "false", "NULL",
            ]),
            known_functions: word_set(&[
                "printf", "sprintf", "snprintf", "fprintf", "malloc", "calloc", "realloc", "free",
                "memcpy", "memset", "memmove", "strlen", "strcmp", "strcpy", "strncpy", "fopen",
                "fclose", "fread", "fwrite", "exit", "abort", "assert",
            ]),
            comment_start: "/*".to_string(),
            comment_end: "*/".to_string(),
            single_line_comment: "//".to_string(),
            case_sensitive: true,
            auto_indentation: true,
            tokenizer: Tokenizer::custom(tokenize_c_style),
            token_rules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Option<(usize, PaletteIndex)> {
        tokenize_c_style(input.as_bytes()).map(|t| (t.len, t.color))
    }

    #[test]
    fn test_strings() {
        assert_eq!(tok(r#""abc" x"#), Some((5, PaletteIndex::String)));
        assert_eq!(tok(r#""a\"b""#), Some((6, PaletteIndex::String)));
        assert_eq!(tok(r#""open"#), None);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(tok("'a'"), Some((3, PaletteIndex::CharLiteral)));
        assert_eq!(tok(r"'\n'"), Some((4, PaletteIndex::CharLiteral)));
        assert_eq!(tok("'ab'"), None);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(tok("foo_1 bar"), Some((5, PaletteIndex::Identifier)));
        assert_eq!(tok("_x"), Some((2, PaletteIndex::Identifier)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tok("42;"), Some((2, PaletteIndex::Number)));
        assert_eq!(tok("3.14f"), Some((5, PaletteIndex::Number)));
        assert_eq!(tok("0xFFul"), Some((6, PaletteIndex::Number)));
        assert_eq!(tok("0b1012"), Some((5, PaletteIndex::Number)));
        assert_eq!(tok("1e10"), Some((4, PaletteIndex::Number)));
        assert_eq!(tok("-7"), Some((2, PaletteIndex::Number)));
        // exponent without digits is not a number; '1' alone is not re-tried
        assert_eq!(tok("1e+"), None);
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(tok("-x"), Some((1, PaletteIndex::Punctuation)));
        assert_eq!(tok("::"), Some((1, PaletteIndex::Punctuation)));
        assert_eq!(tok(" x"), None);
        assert_eq!(tok("@"), None);
    }

    #[test]
    fn test_c_definition_uses_callback() {
        let def = LanguageDefinition::c_style();
        assert!(def.tokenizer.is_custom());
        assert!(def.token_rules.is_empty());
        assert!(def.has_syntax());
    }
}
