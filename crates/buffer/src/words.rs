//! Word navigation driven by glyph palette tags.
//!
//! A "word" is a run of glyphs sharing the same palette category, so word
//! edges follow the colorizer's tokens rather than character classes.

use crate::utf8::{char_length, is_continuation};
use crate::{Coordinates, TextBuffer};

impl TextBuffer {
    /// Start of the token containing `from`, skipping whitespace to the left.
    pub fn find_word_start(&self, from: Coordinates) -> Coordinates {
        let Some(line) = self.line(from.line) else {
            return from;
        };
        let mut index = self.character_index(from);
        if index >= line.len() {
            return from;
        }

        while index > 0 && line[index].byte.is_ascii_whitespace() {
            index -= 1;
        }

        let start_color = line[index].color;
        while index > 0 {
            let byte = line[index].byte;
            if !is_continuation(byte) {
                if byte.is_ascii_whitespace() {
                    index += 1;
                    break;
                }
                if start_color != line[index - 1].color {
                    break;
                }
            }
            index -= 1;
        }

        Coordinates::new(from.line, self.column_of(from.line, index))
    }

    /// End of the token starting at `from`. Trailing whitespace is swallowed
    /// when the token is followed by a blank run.
    pub fn find_word_end(&self, from: Coordinates) -> Coordinates {
        let Some(line) = self.line(from.line) else {
            return from;
        };
        let mut index = self.character_index(from);
        if index >= line.len() {
            return from;
        }

        let was_space = line[index].byte.is_ascii_whitespace();
        let start_color = line[index].color;
        while index < line.len() {
            let byte = line[index].byte;
            if start_color != line[index].color {
                break;
            }
            let is_space = byte.is_ascii_whitespace();
            if was_space != is_space {
                if is_space {
                    while index < line.len() && line[index].byte.is_ascii_whitespace() {
                        index += 1;
                    }
                }
                break;
            }
            index += char_length(byte);
        }

        Coordinates::new(from.line, self.column_of(from.line, index.min(line.len())))
    }

    /// Start of the next alphanumeric run after `from`, crossing lines. At the
    /// end of the document this is the end of the last line.
    pub fn find_next_word(&self, from: Coordinates) -> Coordinates {
        let mut at = from;
        if at.line >= self.line_count() {
            return at;
        }

        let mut index = self.character_index(at);
        let mut is_word = false;
        let mut skip = false;
        if let Some(glyph) = self.lines()[at.line].get(index) {
            is_word = glyph.byte.is_ascii_alphanumeric();
            skip = is_word;
        }

        while !is_word || skip {
            if at.line >= self.line_count() {
                let last = self.line_count().saturating_sub(1);
                return Coordinates::new(last, self.line_max_column(last));
            }
            let line = &self.lines()[at.line];
            if index < line.len() {
                is_word = line[index].byte.is_ascii_alphanumeric();
                if is_word && !skip {
                    return Coordinates::new(at.line, self.column_of(at.line, index));
                }
                if !is_word {
                    skip = false;
                }
                index += 1;
            } else {
                index = 0;
                at.line += 1;
                skip = false;
                is_word = false;
            }
        }
        at
    }

    /// True at column 0, past the end of a line, or where the palette tag
    /// changes between the previous glyph and the one at `at`.
    pub fn is_on_word_boundary(&self, at: Coordinates) -> bool {
        let Some(line) = self.line(at.line) else {
            return true;
        };
        if at.column == 0 {
            return true;
        }
        let index = self.character_index(at);
        if index == 0 || index >= line.len() {
            return true;
        }
        line[index].color != line[index - 1].color
    }

    /// Text of the token containing `at`.
    pub fn word_at(&self, at: Coordinates) -> String {
        let start = self.find_word_start(at);
        let end = self.find_word_end(at);
        self.text(start, end)
    }
}
