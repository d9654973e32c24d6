use lunar_core::PaletteIndex;

use crate::utf8::{bytes_to_string, char_length};
use crate::{Coordinates, ErrorMarkers, Glyph, Line};

/// Display columns per tab stop.
pub const TAB_SIZE: usize = 4;

/// Column reached after a tab typed at `column`.
pub fn next_tab_stop(column: usize) -> usize {
    (column / TAB_SIZE + 1) * TAB_SIZE
}

fn advance_column(column: usize, byte: u8) -> usize {
    if byte == b'\t' {
        next_tab_stop(column)
    } else {
        column + 1
    }
}

fn glyphs_from_bytes(bytes: &[u8]) -> Line {
    bytes
        .iter()
        .filter(|&&b| b != b'\r')
        .map(|&b| Glyph::new(b, PaletteIndex::Default))
        .collect()
}

/// Ordered, never-empty sequence of glyph lines plus the error markers
/// attached to them.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<Line>,
    error_markers: ErrorMarkers,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create a buffer holding one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            error_markers: ErrorMarkers::new(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Replace every line. `\r` is dropped, `\n` separates lines.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text
            .as_bytes()
            .split(|&b| b == b'\n')
            .map(glyphs_from_bytes)
            .collect();
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Mutable access to glyphs. The slice cannot change the line count.
    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    /// Text of one line without its terminator.
    pub fn line_text(&self, index: usize) -> String {
        self.lines
            .get(index)
            .map(|line| bytes_to_string(line.iter().map(|g| g.byte).collect()))
            .unwrap_or_default()
    }

    pub fn error_markers(&self) -> &ErrorMarkers {
        &self.error_markers
    }

    pub fn set_error_markers(&mut self, markers: ErrorMarkers) {
        self.error_markers = markers;
    }

    // Coordinate / index model

    /// Byte index inside `at.line` reached when walking up to `at.column`.
    pub fn character_index(&self, at: Coordinates) -> usize {
        let Some(line) = self.lines.get(at.line) else {
            return 0;
        };
        let mut column = 0;
        let mut index = 0;
        while index < line.len() && column < at.column {
            let byte = line[index].byte;
            column = advance_column(column, byte);
            index += char_length(byte);
        }
        index.min(line.len())
    }

    /// Display column of byte `index` inside `line`.
    pub fn column_of(&self, line: usize, index: usize) -> usize {
        let Some(line) = self.lines.get(line) else {
            return 0;
        };
        let limit = index.min(line.len());
        let mut column = 0;
        let mut i = 0;
        while i < limit {
            let byte = line[i].byte;
            column = advance_column(column, byte);
            i += char_length(byte);
        }
        column
    }

    /// Display column just past the last glyph of `line`.
    pub fn line_max_column(&self, line: usize) -> usize {
        self.column_of(line, usize::MAX)
    }

    /// Clamp a coordinate into the buffer. A line past the end maps to the end
    /// of the last line.
    pub fn sanitize(&self, at: Coordinates) -> Coordinates {
        if at.line >= self.lines.len() {
            let last = self.lines.len().saturating_sub(1);
            Coordinates::new(last, self.line_max_column(last))
        } else {
            Coordinates::new(at.line, at.column.min(self.line_max_column(at.line)))
        }
    }

    /// Position one code point after `at`, wrapping to the next line at the
    /// end of a line.
    pub fn advance(&self, at: Coordinates) -> Coordinates {
        let Some(line) = self.lines.get(at.line) else {
            return at;
        };
        let index = self.character_index(at);
        if index < line.len() {
            let next = (index + char_length(line[index].byte)).min(line.len());
            Coordinates::new(at.line, self.column_of(at.line, next))
        } else if at.line + 1 < self.lines.len() {
            Coordinates::new(at.line + 1, 0)
        } else {
            at
        }
    }

    // Mutation primitives

    /// Insert an empty line at `index` (clamped to the line count).
    pub fn insert_line(&mut self, index: usize) -> &mut Line {
        let index = index.min(self.lines.len());
        self.lines.insert(index, Line::new());
        self.error_markers.shift_for_insert(index);
        &mut self.lines[index]
    }

    /// Remove line `index`. Refuses to remove the last remaining line.
    pub fn remove_line(&mut self, index: usize) -> bool {
        self.remove_lines(index, index + 1)
    }

    /// Remove lines `[start, end)`. Refuses to empty the buffer.
    pub fn remove_lines(&mut self, start: usize, end: usize) -> bool {
        let end = end.min(self.lines.len());
        if start >= end {
            return false;
        }
        if end - start >= self.lines.len() {
            log::debug!(
                "Refusing to remove lines {}..{}: buffer would be empty",
                start,
                end
            );
            return false;
        }
        self.lines.drain(start..end);
        self.error_markers.shift_for_remove(start, end);
        true
    }

    /// Append line `index + 1` to line `index` and remove it. An error marker
    /// on the joined line moves up with its text.
    pub fn join_with_next(&mut self, index: usize) -> bool {
        if index + 1 >= self.lines.len() {
            return false;
        }
        let next = std::mem::take(&mut self.lines[index + 1]);
        self.lines[index].extend(next);
        self.error_markers.carry(index + 1, index);
        self.remove_line(index + 1)
    }

    /// Delete the text between `start` and `end`. A reversed or empty range is
    /// a no-op.
    pub fn delete_range(&mut self, start: Coordinates, end: Coordinates) {
        let start = self.sanitize(start);
        let end = self.sanitize(end);
        if end <= start {
            return;
        }

        let start_index = self.character_index(start);
        let end_index = self.character_index(end);

        if start.line == end.line {
            let max_column = self.line_max_column(start.line);
            let line = &mut self.lines[start.line];
            if end.column >= max_column {
                line.truncate(start_index);
            } else {
                line.drain(start_index..end_index.max(start_index));
            }
        } else {
            let tail: Line = self.lines[end.line][end_index..].to_vec();
            let first = &mut self.lines[start.line];
            first.truncate(start_index);
            first.extend(tail);
            self.remove_lines(start.line + 1, end.line + 1);
        }
    }

    /// Insert `text` at `at`, splitting lines on `\n` and skipping `\r`.
    ///
    /// `at` is moved just past the inserted text. Returns the number of lines
    /// added.
    pub fn insert_text_at(&mut self, at: &mut Coordinates, text: &str) -> usize {
        self.insert_bytes_at(at, text.as_bytes())
    }

    /// Byte-level variant of [`TextBuffer::insert_text_at`].
    pub fn insert_bytes_at(&mut self, at: &mut Coordinates, bytes: &[u8]) -> usize {
        *at = self.sanitize(*at);
        let mut index = self.character_index(*at);
        let mut added = 0;

        for (n, segment) in bytes.split(|&b| b == b'\n').enumerate() {
            if n > 0 {
                let tail = self.lines[at.line].split_off(index);
                *self.insert_line(at.line + 1) = tail;
                at.line += 1;
                index = 0;
                added += 1;
            }
            let glyphs = glyphs_from_bytes(segment);
            let count = glyphs.len();
            self.lines[at.line].splice(index..index, glyphs);
            index += count;
        }

        at.column = self.column_of(at.line, index);
        added
    }

    /// Text between two coordinates, lines joined with `\n`.
    pub fn text(&self, start: Coordinates, end: Coordinates) -> String {
        if end <= start || start.line >= self.lines.len() {
            return String::new();
        }
        let last = self.lines.len() - 1;
        let (end_line, end_index) = if end.line > last {
            (last, self.lines[last].len())
        } else {
            (end.line, self.character_index(end))
        };
        let start_index = self.character_index(start);

        let mut bytes = Vec::new();
        for line_no in start.line..=end_line {
            let line = &self.lines[line_no];
            let from = if line_no == start.line { start_index } else { 0 };
            let to = if line_no == end_line {
                end_index
            } else {
                line.len()
            };
            if from < to {
                bytes.extend(line[from..to].iter().map(|g| g.byte));
            }
            if line_no < end_line {
                bytes.push(b'\n');
            }
        }
        bytes_to_string(bytes)
    }

    /// Whole document, lines joined with `\n` and no trailing terminator.
    pub fn full_text(&self) -> String {
        self.text(
            Coordinates::new(0, 0),
            Coordinates::new(self.lines.len(), 0),
        )
    }

    /// Width of the widest line in display columns.
    pub fn longest_line_columns(&self) -> usize {
        (0..self.lines.len())
            .map(|line| self.line_max_column(line))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.full_text(), "");
        assert_eq!(TextBuffer::from_text("").line_count(), 1);
    }

    #[test]
    fn test_round_trip_strips_carriage_returns() {
        let input = "local x = 1\r\nprint(\"héllo\")\n\n-- ok 😀";
        let buffer = TextBuffer::from_text(input);
        assert_eq!(buffer.full_text(), input.replace('\r', ""));
        assert_eq!(buffer.line_count(), 4);
    }

    #[test]
    fn test_trailing_newline_survives_round_trip() {
        let buffer = TextBuffer::from_text("a\nb\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.full_text(), "a\nb\n");
    }

    #[test]
    fn test_tab_expansion() {
        let buffer = TextBuffer::from_text("\tA");
        assert_eq!(buffer.line_max_column(0), 5);
        assert_eq!(buffer.column_of(0, 1), 4);
        assert_eq!(buffer.character_index(c(0, 4)), 1);

        let buffer = TextBuffer::from_text("ab\tc");
        assert_eq!(buffer.line_max_column(0), 5);
        assert_eq!(next_tab_stop(3), 4);
        assert_eq!(next_tab_stop(4), 8);
    }

    #[test]
    fn test_coordinate_round_trip_ascii() {
        let buffer = TextBuffer::from_text("hello world");
        for column in 0..=11 {
            let index = buffer.character_index(c(0, column));
            assert_eq!(buffer.column_of(0, index), column);
        }
    }

    #[test]
    fn test_multibyte_counts_one_column() {
        let buffer = TextBuffer::from_text("aé😀b");
        assert_eq!(buffer.line_max_column(0), 4);
        assert_eq!(buffer.character_index(c(0, 2)), 3);
        assert_eq!(buffer.character_index(c(0, 3)), 7);
        assert_eq!(buffer.column_of(0, 7), 3);
    }

    #[test]
    fn test_sanitize_clamps() {
        let buffer = TextBuffer::from_text("abc\nde");
        assert_eq!(buffer.sanitize(c(0, 10)), c(0, 3));
        assert_eq!(buffer.sanitize(c(9, 0)), c(1, 2));
        assert_eq!(buffer.sanitize(c(1, 1)), c(1, 1));
    }

    #[test]
    fn test_advance_skips_code_point_and_wraps() {
        let buffer = TextBuffer::from_text("é\nx");
        assert_eq!(buffer.advance(c(0, 0)), c(0, 1));
        assert_eq!(buffer.advance(c(0, 1)), c(1, 0));
        assert_eq!(buffer.advance(c(1, 1)), c(1, 1));
    }

    #[test]
    fn test_remove_last_line_is_refused() {
        let mut buffer = TextBuffer::from_text("only");
        assert!(!buffer.remove_line(0));
        assert_eq!(buffer.line_count(), 1);

        let mut buffer = TextBuffer::from_text("a\nb");
        assert!(!buffer.remove_lines(0, 2));
        assert!(buffer.remove_line(0));
        assert_eq!(buffer.full_text(), "b");
    }

    #[test]
    fn test_insert_line_shifts_error_marker() {
        let mut buffer = TextBuffer::from_text("1\n2\n3\n4\n5");
        buffer.set_error_markers([(4, "bad".to_string())].into_iter().collect());
        buffer.insert_line(2);
        assert_eq!(buffer.line_count(), 6);
        assert_eq!(buffer.error_markers().get(4), None);
        assert_eq!(buffer.error_markers().get(5), Some("bad"));
    }

    #[test]
    fn test_line_inserted_below_marker_leaves_it() {
        let mut buffer = TextBuffer::from_text("a\nbad\nc");
        buffer.set_error_markers([(2, "here".to_string())].into_iter().collect());
        buffer.insert_line(2);
        assert_eq!(buffer.error_markers().get(2), Some("here"));
        assert_eq!(buffer.error_markers().get(3), None);

        buffer.insert_line(1);
        assert_eq!(buffer.error_markers().get(3), Some("here"));
    }

    #[test]
    fn test_remove_line_drops_its_marker() {
        let mut buffer = TextBuffer::from_text("1\n2\n3\n4");
        buffer.set_error_markers(
            [(2, "gone".to_string()), (4, "kept".to_string())]
                .into_iter()
                .collect(),
        );
        buffer.remove_line(1);
        assert_eq!(buffer.error_markers().len(), 1);
        assert_eq!(buffer.error_markers().get(3), Some("kept"));
    }

    #[test]
    fn test_delete_range_same_line() {
        let mut buffer = TextBuffer::from_text("hello world");
        buffer.delete_range(c(0, 5), c(0, 11));
        assert_eq!(buffer.full_text(), "hello");

        let mut buffer = TextBuffer::from_text("hello world");
        buffer.delete_range(c(0, 1), c(0, 3));
        assert_eq!(buffer.full_text(), "hlo world");
    }

    #[test]
    fn test_delete_range_multi_line() {
        let mut buffer = TextBuffer::from_text("first\nsecond\nthird");
        buffer.delete_range(c(0, 2), c(2, 3));
        assert_eq!(buffer.full_text(), "fird");
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_delete_range_reversed_is_noop() {
        let mut buffer = TextBuffer::from_text("abc");
        buffer.delete_range(c(0, 2), c(0, 1));
        buffer.delete_range(c(0, 1), c(0, 1));
        assert_eq!(buffer.full_text(), "abc");
    }

    #[test]
    fn test_insert_text_at_splits_lines() {
        let mut buffer = TextBuffer::from_text("ac");
        let mut at = c(0, 1);
        let added = buffer.insert_text_at(&mut at, "1\r\n2\n3");
        assert_eq!(added, 2);
        assert_eq!(at, c(2, 1));
        assert_eq!(buffer.full_text(), "a1\n2\n3c");
    }

    #[test]
    fn test_insert_text_at_tracks_tab_columns() {
        let mut buffer = TextBuffer::new();
        let mut at = c(0, 0);
        buffer.insert_text_at(&mut at, "\tx");
        assert_eq!(at, c(0, 5));
    }

    #[test]
    fn test_text_range() {
        let buffer = TextBuffer::from_text("one\ntwo\nthree");
        assert_eq!(buffer.text(c(0, 1), c(1, 2)), "ne\ntw");
        assert_eq!(buffer.text(c(1, 0), c(3, 0)), "two\nthree");
        assert_eq!(buffer.text(c(1, 2), c(1, 1)), "");
    }

    #[test]
    fn test_longest_line_columns() {
        let buffer = TextBuffer::from_text("ab\n\tabc\nx");
        assert_eq!(buffer.longest_line_columns(), 7);
    }

    #[test]
    fn test_join_with_next_carries_marker() {
        let mut buffer = TextBuffer::from_text("ab\ncd\nef");
        buffer.set_error_markers([(2, "bad".to_string())].into_iter().collect());
        assert!(buffer.join_with_next(0));
        assert_eq!(buffer.full_text(), "abcd\nef");
        assert_eq!(buffer.error_markers().get(1), Some("bad"));
        assert!(!buffer.join_with_next(1));
    }
}
