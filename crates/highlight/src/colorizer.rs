//! Time-sliced colorizer.
//!
//! Edits widen a dirty line range; every frame [`Colorizer::step`] re-tokenizes
//! a bounded slice of it. Comment state is recomputed in a separate pass over
//! the whole buffer because a single `--[[` can restyle every line below it.

use std::collections::HashSet;

use lunar_buffer::utf8::char_length;
use lunar_buffer::{Glyph, TextBuffer};
use lunar_core::PaletteIndex;
use regex::bytes::Regex;

use crate::{LanguageDefinition, Token};

/// Lines per step when tokenizing with regex rules.
pub const REGEX_LINES_PER_STEP: usize = 10;
/// Lines per step when a callback tokenizer is installed.
pub const CALLBACK_LINES_PER_STEP: usize = 10_000;

fn matches_at(line: &[Glyph], index: usize, marker: &[u8]) -> bool {
    !marker.is_empty()
        && index + marker.len() <= line.len()
        && line[index..index + marker.len()]
            .iter()
            .zip(marker)
            .all(|(glyph, byte)| glyph.byte == *byte)
}

fn mark(line: &mut [Glyph], index: usize, width: usize, multi_line: bool, single_line: bool) {
    for glyph in line.iter_mut().skip(index).take(width) {
        glyph.multi_line_comment = multi_line;
        glyph.comment = single_line;
    }
}

#[derive(Debug)]
pub struct Colorizer {
    language: LanguageDefinition,
    rules: Vec<(Regex, PaletteIndex)>,
    purple_keywords: HashSet<String>,
    blue_keywords: HashSet<String>,
    known_functions: HashSet<String>,
    /// Pending `[min, max)` line range.
    dirty: Option<(usize, usize)>,
    check_comments: bool,
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(LanguageDefinition::default())
    }
}

impl Colorizer {
    pub fn new(language: LanguageDefinition) -> Self {
        let mut colorizer = Self {
            language: LanguageDefinition::plain_text(),
            rules: Vec::new(),
            purple_keywords: HashSet::new(),
            blue_keywords: HashSet::new(),
            known_functions: HashSet::new(),
            dirty: None,
            check_comments: false,
        };
        colorizer.set_language(language);
        colorizer
    }

    /// Install a language: compile its rules and schedule a full pass.
    ///
    /// Rules that fail to compile are skipped with a warning.
    pub fn set_language(&mut self, language: LanguageDefinition) {
        self.rules = language
            .token_rules
            .iter()
            .filter_map(|(pattern, color)| {
                match Regex::new(&format!("^(?:{})", pattern)) {
                    Ok(regex) => Some((regex, *color)),
                    Err(e) => {
                        log::warn!(
                            "Skipping token rule {:?} for '{}': {}",
                            pattern,
                            language.name,
                            e
                        );
                        None
                    }
                }
            })
            .collect();

        let fold = |set: &HashSet<String>| -> HashSet<String> {
            if language.case_sensitive {
                set.clone()
            } else {
                set.iter().map(|word| word.to_uppercase()).collect()
            }
        };
        self.purple_keywords = fold(&language.purple_keywords);
        self.blue_keywords = fold(&language.blue_keywords);
        self.known_functions = fold(&language.known_functions);

        log::debug!(
            "Language '{}' installed with {} token rules",
            language.name,
            self.rules.len()
        );
        self.language = language;
        self.mark_all_dirty();
    }

    pub fn language(&self) -> &LanguageDefinition {
        &self.language
    }

    /// Schedule `line_count` lines from `from_line` (`None` = to the end).
    /// Comment state is always rescanned.
    pub fn mark_dirty(&mut self, from_line: usize, line_count: Option<usize>) {
        let to_line = match line_count {
            Some(count) => from_line.saturating_add(count),
            None => usize::MAX,
        };
        self.dirty = Some(match self.dirty {
            Some((min, max)) => (min.min(from_line), max.max(to_line)),
            None => (from_line, to_line),
        });
        self.check_comments = true;
    }

    pub fn mark_all_dirty(&mut self) {
        self.mark_dirty(0, None);
    }

    /// Nothing left to colorize.
    pub fn is_idle(&self) -> bool {
        self.dirty.is_none() && !self.check_comments
    }

    /// Pending line range, if any.
    pub fn dirty_range(&self) -> Option<(usize, usize)> {
        self.dirty
    }

    pub fn lines_per_step(&self) -> usize {
        if self.language.tokenizer.is_custom() {
            CALLBACK_LINES_PER_STEP
        } else {
            REGEX_LINES_PER_STEP
        }
    }

    /// One frame's worth of work: rescan comments if needed, then tokenize
    /// at most [`Colorizer::lines_per_step`] dirty lines.
    pub fn step(&mut self, buffer: &mut TextBuffer) {
        if self.check_comments {
            self.scan_comments(buffer);
            self.check_comments = false;
        }

        let Some((min, max)) = self.dirty else {
            return;
        };
        let max = max.min(buffer.line_count());
        if min >= max {
            self.dirty = None;
            return;
        }
        let to = min.saturating_add(self.lines_per_step()).min(max);
        self.colorize_range(buffer, min, to);
        self.dirty = if to >= max { None } else { Some((to, max)) };
    }

    /// Step until idle.
    pub fn run_to_completion(&mut self, buffer: &mut TextBuffer) {
        while !self.is_idle() {
            self.step(buffer);
        }
    }

    /// Re-tokenize lines `[from, to)`.
    pub fn colorize_range(&self, buffer: &mut TextBuffer, from: usize, to: usize) {
        let to = to.min(buffer.line_count());
        if from >= to {
            return;
        }

        for line in &mut buffer.lines_mut()[from..to] {
            if line.is_empty() {
                continue;
            }
            let bytes: Vec<u8> = line.iter().map(|g| g.byte).collect();
            for glyph in line.iter_mut() {
                glyph.color = PaletteIndex::Default;
            }

            let mut first = 0;
            while first < bytes.len() {
                let rest = &bytes[first..];
                let token = self
                    .language
                    .tokenizer
                    .tokenize(rest)
                    .filter(|t| t.len > 0)
                    .or_else(|| self.match_rules(rest));

                match token {
                    None => first += 1,
                    Some(Token { len, color }) => {
                        let len = len.min(rest.len());
                        let color = if color == PaletteIndex::Identifier {
                            self.classify_identifier(&rest[..len])
                        } else {
                            color
                        };
                        for glyph in &mut line[first..first + len] {
                            glyph.color = color;
                        }
                        first += len;
                    }
                }
            }
        }
    }

    fn match_rules(&self, input: &[u8]) -> Option<Token> {
        self.rules.iter().find_map(|(regex, color)| {
            regex
                .find(input)
                .filter(|m| m.start() == 0 && m.end() > 0)
                .map(|m| Token {
                    len: m.end(),
                    color: *color,
                })
        })
    }

    fn classify_identifier(&self, bytes: &[u8]) -> PaletteIndex {
        let text = String::from_utf8_lossy(bytes);
        let id = if self.language.case_sensitive {
            text.into_owned()
        } else {
            text.to_uppercase()
        };

        if self.purple_keywords.contains(&id) {
            PaletteIndex::PurpleKeyword
        } else if self.blue_keywords.contains(&id) {
            PaletteIndex::BlueKeyword
        } else if self.known_functions.contains(&id) {
            PaletteIndex::KnownFunction
        } else {
            PaletteIndex::Identifier
        }
    }

    /// Recompute comment flags for every glyph.
    ///
    /// Strings (double quotes, backslash escapes, doubled `""`) hide comment
    /// markers. String and single-line comment state end with the line unless
    /// it ends in a backslash.
    pub fn scan_comments(&self, buffer: &mut TextBuffer) {
        let start_marker = self.language.comment_start.as_bytes();
        let end_marker = self.language.comment_end.as_bytes();
        let single_marker = self.language.single_line_comment.as_bytes();

        let mut comment_start: Option<(usize, usize)> = None;
        let mut within_string = false;
        let mut within_single = false;
        let mut concatenate = false;

        for (line_no, line) in buffer.lines_mut().iter_mut().enumerate() {
            if !concatenate {
                within_single = false;
                within_string = false;
            }
            concatenate = line.last().is_some_and(|g| g.byte == b'\\');

            let mut index = 0;
            while index < line.len() {
                let byte = line[index].byte;
                let mut step = char_length(byte).min(line.len() - index);
                let in_comment = comment_start
                    .is_some_and(|(l, i)| l < line_no || (l == line_no && i <= index));

                if within_string {
                    mark(line, index, step, in_comment, within_single);
                    if byte == b'"' {
                        if line.get(index + 1).is_some_and(|g| g.byte == b'"') {
                            mark(line, index + 1, 1, in_comment, within_single);
                            step += 1;
                        } else {
                            within_string = false;
                        }
                    } else if byte == b'\\' && index + step < line.len() {
                        let escaped = char_length(line[index + step].byte)
                            .min(line.len() - index - step);
                        mark(line, index + step, escaped, in_comment, within_single);
                        step += escaped;
                    }
                } else {
                    if !in_comment && !within_single {
                        if byte == b'"' {
                            within_string = true;
                        } else if matches_at(line, index, start_marker) {
                            comment_start = Some((line_no, index));
                        } else if matches_at(line, index, single_marker) {
                            within_single = true;
                        }
                    }

                    let in_comment = comment_start
                        .is_some_and(|(l, i)| l < line_no || (l == line_no && i <= index));
                    mark(line, index, step, in_comment, within_single);

                    if let Some((start_line, start_index)) = comment_start {
                        let end = index + 1;
                        let body_start = if start_line == line_no {
                            start_index + start_marker.len()
                        } else {
                            0
                        };
                        if end >= end_marker.len()
                            && end - end_marker.len() >= body_start
                            && matches_at(line, end - end_marker.len(), end_marker)
                        {
                            comment_start = None;
                        }
                    }
                }

                index += step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tokenizer;

    fn colors(buffer: &TextBuffer, line: usize) -> Vec<PaletteIndex> {
        buffer.lines()[line].iter().map(|g| g.color).collect()
    }

    fn resolved(buffer: &TextBuffer, line: usize) -> Vec<PaletteIndex> {
        buffer.lines()[line]
            .iter()
            .map(|g| g.resolved_color())
            .collect()
    }

    fn colorize(text: &str, language: LanguageDefinition) -> TextBuffer {
        let mut buffer = TextBuffer::from_text(text);
        let mut colorizer = Colorizer::new(language);
        colorizer.run_to_completion(&mut buffer);
        buffer
    }

    #[test]
    fn test_lua_tokens_and_keywords() {
        use PaletteIndex::*;
        let buffer = colorize("local x = 42", LanguageDefinition::lua());
        let expected = [
            BlueKeyword, BlueKeyword, BlueKeyword, BlueKeyword, BlueKeyword, Default, Identifier,
            Default, Punctuation, Default, Number, Number,
        ];
        assert_eq!(colors(&buffer, 0), expected);
    }

    #[test]
    fn test_identifier_split_by_punctuation() {
        use PaletteIndex::*;
        let buffer = colorize("foo.bar", LanguageDefinition::lua());
        assert_eq!(
            colors(&buffer, 0),
            [Identifier, Identifier, Identifier, Punctuation, Identifier, Identifier, Identifier]
        );
    }

    #[test]
    fn test_keyword_tiers() {
        let buffer = colorize("function print", LanguageDefinition::lua());
        assert_eq!(buffer.lines()[0][0].color, PaletteIndex::PurpleKeyword);
        assert_eq!(buffer.lines()[0][9].color, PaletteIndex::KnownFunction);
    }

    #[test]
    fn test_single_line_comment_flags() {
        let buffer = colorize("x = 1 -- note", LanguageDefinition::lua());
        let line = &buffer.lines()[0];
        assert!(!line[0].comment);
        assert!(line[6].comment);
        assert!(line[12].comment);
        assert_eq!(line[12].resolved_color(), PaletteIndex::Comment);
    }

    #[test]
    fn test_multi_line_comment_spans_lines() {
        let buffer = colorize("a --[[ one\ntwo ]] b\nc", LanguageDefinition::lua());
        assert!(!buffer.lines()[0][0].multi_line_comment);
        assert!(buffer.lines()[0][2].multi_line_comment);
        assert!(resolved(&buffer, 1)[..6]
            .iter()
            .all(|c| *c == PaletteIndex::MultiLineComment));
        assert_eq!(buffer.lines()[1][7].resolved_color(), PaletteIndex::Identifier);
        assert!(!buffer.lines()[2][0].multi_line_comment);
    }

    #[test]
    fn test_comment_marker_inside_string_is_ignored() {
        let buffer = colorize(r#"print("-- not \" a comment") x"#, LanguageDefinition::lua());
        assert!(buffer.lines()[0].iter().all(|g| !g.comment));
        let last = buffer.lines()[0].len() - 1;
        assert_eq!(buffer.lines()[0][last].color, PaletteIndex::Identifier);
    }

    #[test]
    fn test_string_state_ends_with_line() {
        let buffer = colorize("s = \"open\n-- comment", LanguageDefinition::lua());
        assert!(buffer.lines()[1][0].comment);
    }

    #[test]
    fn test_c_block_comment_does_not_close_on_its_own_star() {
        let buffer = colorize("/*/ x */ y", LanguageDefinition::c_style());
        let line = &buffer.lines()[0];
        assert!(line[4].multi_line_comment);
        assert!(line[7].multi_line_comment);
        assert!(!line[9].multi_line_comment);
    }

    #[test]
    fn test_regex_tokenizer_is_time_sliced() {
        let text = vec!["x"; 25].join("\n");
        let mut buffer = TextBuffer::from_text(&text);
        let mut colorizer = Colorizer::new(LanguageDefinition::lua());
        assert_eq!(colorizer.lines_per_step(), REGEX_LINES_PER_STEP);

        colorizer.step(&mut buffer);
        assert_eq!(buffer.lines()[9][0].color, PaletteIndex::Identifier);
        assert_eq!(buffer.lines()[10][0].color, PaletteIndex::Default);
        assert_eq!(colorizer.dirty_range(), Some((10, 25)));

        colorizer.step(&mut buffer);
        colorizer.step(&mut buffer);
        assert!(colorizer.is_idle());
        assert_eq!(buffer.lines()[24][0].color, PaletteIndex::Identifier);
    }

    #[test]
    fn test_callback_tokenizer_finishes_in_one_step() {
        let text = vec!["x"; 25].join("\n");
        let mut buffer = TextBuffer::from_text(&text);
        let mut colorizer = Colorizer::new(LanguageDefinition::c_style());
        colorizer.step(&mut buffer);
        assert!(colorizer.is_idle());
        assert_eq!(buffer.lines()[24][0].color, PaletteIndex::Identifier);
    }

    #[test]
    fn test_mark_dirty_widens_range() {
        let mut colorizer = Colorizer::default();
        let mut buffer = TextBuffer::from_text("a\nb\nc\nd\ne\nf");
        colorizer.run_to_completion(&mut buffer);
        colorizer.mark_dirty(4, Some(1));
        colorizer.mark_dirty(1, Some(2));
        assert_eq!(colorizer.dirty_range(), Some((1, 5)));
        assert!(!colorizer.is_idle());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut language = LanguageDefinition::lua();
        language.case_sensitive = false;
        let buffer = colorize("If WHILE Print", language);
        assert_eq!(buffer.lines()[0][0].color, PaletteIndex::PurpleKeyword);
        assert_eq!(buffer.lines()[0][3].color, PaletteIndex::PurpleKeyword);
        assert_eq!(buffer.lines()[0][9].color, PaletteIndex::KnownFunction);
    }

    #[test]
    fn test_callback_declines_then_rules_apply() {
        let mut language = LanguageDefinition::lua();
        language.tokenizer = Tokenizer::custom(|input| {
            (input.first() == Some(&b'@')).then_some(Token {
                len: 1,
                color: PaletteIndex::CharLiteral,
            })
        });
        let buffer = colorize("@x", language);
        assert_eq!(
            colors(&buffer, 0),
            [PaletteIndex::CharLiteral, PaletteIndex::Identifier]
        );
    }

    #[test]
    fn test_invalid_rule_is_skipped() {
        let mut language = LanguageDefinition::plain_text();
        language.token_rules = vec![
            ("(unclosed".to_string(), PaletteIndex::Number),
            ("[0-9]+".to_string(), PaletteIndex::Number),
        ];
        let buffer = colorize("a 12", language);
        assert_eq!(buffer.lines()[0][2].color, PaletteIndex::Number);
        assert_eq!(buffer.lines()[0][0].color, PaletteIndex::Default);
    }

    #[test]
    fn test_colorization_is_idempotent() {
        let mut buffer =
            TextBuffer::from_text("local t = { 1, 2 } -- x\nprint(t[1])\n--[[ a\nb ]]");
        let mut colorizer = Colorizer::new(LanguageDefinition::lua());
        colorizer.run_to_completion(&mut buffer);
        let first: Vec<_> = buffer.lines().to_vec();

        colorizer.mark_all_dirty();
        colorizer.run_to_completion(&mut buffer);
        assert_eq!(buffer.lines(), &first[..]);
    }

    #[test]
    fn test_plain_text_leaves_default() {
        let buffer = colorize("-- \"x\" 12", LanguageDefinition::plain_text());
        assert!(buffer.lines()[0]
            .iter()
            .all(|g| g.resolved_color() == PaletteIndex::Default));
    }
}
