//! Cursor movement.
//!
//! Every move updates the interactive anchor pair: without `select` both
//! anchors collapse onto the cursor, with `select` the anchor the cursor
//! was sitting on follows it.

use lunar_buffer::utf8::{char_length, is_continuation};
use lunar_buffer::Coordinates;

use crate::selection::SelectionMode;
use crate::TextEditor;

impl TextEditor {
    pub fn move_up(&mut self, amount: usize, select: bool) {
        let old = self.state.cursor_position;
        self.state.cursor_position.line = old.line.saturating_sub(amount);
        if self.state.cursor_position != old {
            self.follow_backward(old, select);
            self.finish_move(SelectionMode::Normal);
        }
    }

    pub fn move_down(&mut self, amount: usize, select: bool) {
        let old = self.state.cursor_position;
        let last = self.buffer.line_count().saturating_sub(1);
        self.state.cursor_position.line = old.line.saturating_add(amount).min(last);
        if self.state.cursor_position != old {
            self.follow_forward(old, select);
            self.finish_move(SelectionMode::Normal);
        }
    }

    /// Move left by `amount` code points, wrapping to the end of the previous
    /// line. In word mode each step lands on a token start.
    pub fn move_left(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.state.cursor_position;
        let mut pos = self.cursor_coordinates();
        let mut line = pos.line;
        let mut index = self.buffer.character_index(pos);

        for _ in 0..amount {
            if index == 0 {
                if line > 0 {
                    line -= 1;
                    index = self.buffer.line(line).map_or(0, |l| l.len());
                }
            } else {
                index -= 1;
                if let Some(glyphs) = self.buffer.line(line) {
                    while index > 0 && is_continuation(glyphs[index].byte) {
                        index -= 1;
                    }
                }
            }

            pos = Coordinates::new(line, self.buffer.column_of(line, index));
            if word_mode {
                pos = self.buffer.find_word_start(pos);
                index = self.buffer.character_index(pos);
            }
        }

        self.state.cursor_position = Coordinates::new(line, self.buffer.column_of(line, index));
        self.follow_backward(old, select);
        self.finish_move(if select && word_mode {
            SelectionMode::Word
        } else {
            SelectionMode::Normal
        });
    }

    /// Move right by `amount` code points, wrapping to the start of the next
    /// line. In word mode each step lands on the next alphanumeric run.
    pub fn move_right(&mut self, amount: usize, select: bool, word_mode: bool) {
        let old = self.state.cursor_position;
        if old.line >= self.buffer.line_count() {
            return;
        }

        let mut pos = self.cursor_coordinates();
        for _ in 0..amount {
            let index = self.buffer.character_index(pos);
            let len = self.buffer.line(pos.line).map_or(0, |l| l.len());
            if index >= len {
                if pos.line + 1 < self.buffer.line_count() {
                    pos = Coordinates::new(pos.line + 1, 0);
                } else {
                    break;
                }
            } else {
                let byte = self.buffer.lines()[pos.line][index].byte;
                let next = (index + char_length(byte)).min(len);
                pos = Coordinates::new(pos.line, self.buffer.column_of(pos.line, next));
                if word_mode {
                    pos = self.buffer.find_next_word(pos);
                }
            }
        }

        if pos == old {
            return;
        }
        self.state.cursor_position = pos;
        self.follow_forward(old, select);
        self.finish_move(if select && word_mode {
            SelectionMode::Word
        } else {
            SelectionMode::Normal
        });
    }

    /// Move to column 0 of the cursor line.
    pub fn move_home(&mut self, select: bool) {
        let old = self.state.cursor_position;
        self.state.cursor_position = Coordinates::new(self.cursor_coordinates().line, 0);
        if self.state.cursor_position != old {
            self.follow_backward(old, select);
            self.finish_move(SelectionMode::Normal);
        }
    }

    /// Move past the last glyph of the cursor line.
    pub fn move_end(&mut self, select: bool) {
        let old = self.state.cursor_position;
        let line = self.cursor_coordinates().line;
        self.state.cursor_position = Coordinates::new(line, self.buffer.line_max_column(line));
        if self.state.cursor_position != old {
            self.follow_forward(old, select);
            self.finish_move(SelectionMode::Normal);
        }
    }

    pub fn move_page_up(&mut self, select: bool) {
        self.move_up(self.page_lines.saturating_sub(1).max(1), select);
    }

    pub fn move_page_down(&mut self, select: bool) {
        self.move_down(self.page_lines.saturating_sub(1).max(1), select);
    }

    /// Anchor update for moves toward the document start.
    fn follow_backward(&mut self, old: Coordinates, select: bool) {
        let cursor = self.state.cursor_position;
        if !select {
            self.interactive_start = cursor;
            self.interactive_end = cursor;
        } else if old == self.interactive_start {
            self.interactive_start = cursor;
        } else if old == self.interactive_end {
            self.interactive_end = cursor;
        } else {
            self.interactive_start = cursor;
            self.interactive_end = old;
        }
    }

    /// Anchor update for moves toward the document end.
    fn follow_forward(&mut self, old: Coordinates, select: bool) {
        let cursor = self.state.cursor_position;
        if !select {
            self.interactive_start = cursor;
            self.interactive_end = cursor;
        } else if old == self.interactive_end {
            self.interactive_end = self.buffer.sanitize(cursor);
        } else if old == self.interactive_start {
            self.interactive_start = cursor;
        } else {
            self.interactive_start = old;
            self.interactive_end = cursor;
        }
    }

    fn finish_move(&mut self, mode: SelectionMode) {
        let (start, end) = (self.interactive_start, self.interactive_end);
        self.set_selection(start, end, mode);
        self.cursor_position_changed = true;
        self.scroll_to_cursor = true;
    }
}
