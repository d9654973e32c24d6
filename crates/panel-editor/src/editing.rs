//! Text editing operations.
//!
//! Every public operation records one [`UndoRecord`] holding the text it
//! added and removed plus the cursor/selection state before and after, so
//! undo and redo replay it exactly. All of them are no-ops in read-only mode.

use lunar_buffer::utf8::is_continuation;
use lunar_buffer::{Coordinates, Glyph, UndoRecord};
use lunar_core::PaletteIndex;

use crate::selection::SelectionMode;
use crate::TextEditor;

impl TextEditor {
    /// Type one character.
    ///
    /// Tab over a multi-line selection indents every selected line (or
    /// outdents with `shift`). Otherwise the selection is replaced, and `\n`
    /// splits the line, carrying the leading whitespace along when the
    /// language asks for auto-indentation.
    pub fn enter_character(&mut self, ch: char, shift: bool) {
        if self.config.read_only {
            return;
        }

        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            if ch == '\t' && self.state.selection_start.line != self.state.selection_end.line {
                self.indent_selection(record, shift);
                return;
            }
            record.removed = self.get_selected_text();
            record.removed_start = self.state.selection_start;
            record.removed_end = self.state.selection_end;
            self.remove_selection();
        }

        let coord = self.cursor_coordinates();
        record.added_start = coord;

        let text = if ch == '\n' {
            let mut text = String::from("\n");
            if self.colorizer.language().auto_indentation {
                text.extend(
                    self.buffer.lines()[coord.line]
                        .iter()
                        .map(|g| g.byte)
                        .take_while(|&b| b == b' ' || b == b'\t')
                        .map(char::from),
                );
            }
            text
        } else {
            ch.to_string()
        };

        let mut end = coord;
        self.buffer.insert_text_at(&mut end, &text);
        record.added = text;

        self.set_cursor_position(end);
        self.collapse_selection_to_cursor();
        self.text_changed = true;

        record.added_end = self.cursor_coordinates();
        record.after = self.state;
        self.undo_log.push(record);

        self.colorize(coord.line.saturating_sub(1), 3);
    }

    /// Block indent/outdent for a tab typed over a multi-line selection.
    fn indent_selection(&mut self, mut record: UndoRecord, outdent: bool) {
        let mut start = self.state.selection_start;
        let mut end = self.state.selection_end;
        let original_end = end;

        start.column = 0;
        if end.column == 0 && end.line > 0 {
            end.line -= 1;
        }
        end.line = end.line.min(self.buffer.line_count().saturating_sub(1));
        end.column = self.buffer.line_max_column(end.line);

        record.removed_start = start;
        record.removed_end = end;
        record.removed = self.buffer.text(start, end);

        let mut modified = false;
        for line in &mut self.buffer.lines_mut()[start.line..=end.line] {
            if outdent {
                if line.first().is_some_and(|g| g.byte == b'\t') {
                    line.remove(0);
                    modified = true;
                } else {
                    let spaces = line.iter().take(4).take_while(|g| g.byte == b' ').count();
                    if spaces > 0 {
                        line.drain(..spaces);
                        modified = true;
                    }
                }
            } else {
                line.insert(0, Glyph::new(b'\t', PaletteIndex::Default));
                modified = true;
            }
        }

        if !modified {
            return;
        }

        let range_end = if original_end.column != 0 {
            end = Coordinates::new(end.line, self.buffer.line_max_column(end.line));
            end
        } else {
            end = Coordinates::new(original_end.line, 0);
            Coordinates::new(end.line - 1, self.buffer.line_max_column(end.line - 1))
        };

        record.added = self.buffer.text(start, range_end);
        record.added_start = start;
        record.added_end = range_end;

        self.state.selection_start = start;
        self.state.selection_end = end;
        self.interactive_start = start;
        self.interactive_end = end;
        record.after = self.state;
        self.undo_log.push(record);

        self.text_changed = true;
        self.colorize(start.line, end.line - start.line + 1);
    }

    /// Delete the selection, or the code point before the cursor, or join
    /// the cursor line onto the previous one.
    pub fn backspace(&mut self) {
        if self.config.read_only {
            return;
        }

        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            record.removed = self.get_selected_text();
            record.removed_start = self.state.selection_start;
            record.removed_end = self.state.selection_end;
            self.remove_selection();
        } else {
            let pos = self.cursor_coordinates();
            self.set_cursor_position(pos);

            if pos.column == 0 {
                if pos.line == 0 {
                    return;
                }
                let prev = pos.line - 1;
                let prev_end = Coordinates::new(prev, self.buffer.line_max_column(prev));
                record.removed = "\n".to_string();
                record.removed_start = prev_end;
                record.removed_end = self.buffer.advance(prev_end);
                self.buffer.join_with_next(prev);
                self.set_cursor_position(prev_end);
            } else {
                let index = self.buffer.character_index(pos);
                let line = &self.buffer.lines()[pos.line];
                let mut start = index - 1;
                while start > 0 && is_continuation(line[start].byte) {
                    start -= 1;
                }
                let removed_start =
                    Coordinates::new(pos.line, self.buffer.column_of(pos.line, start));
                let removed_end =
                    Coordinates::new(pos.line, self.buffer.column_of(pos.line, index));
                record.removed = self.buffer.text(removed_start, removed_end);
                record.removed_start = removed_start;
                record.removed_end = removed_end;
                self.buffer.delete_range(removed_start, removed_end);
                self.set_cursor_position(removed_start);
            }

            self.collapse_selection_to_cursor();
            self.text_changed = true;
            let line = self.state.cursor_position.line;
            self.colorize(line, 1);
        }

        record.after = self.state;
        self.undo_log.push(record);
    }

    /// Delete the selection, or the code point after the cursor, or join the
    /// next line onto the cursor line.
    pub fn delete(&mut self) {
        if self.config.read_only {
            return;
        }

        let mut record = UndoRecord::new(self.state);

        if self.has_selection() {
            record.removed = self.get_selected_text();
            record.removed_start = self.state.selection_start;
            record.removed_end = self.state.selection_end;
            self.remove_selection();
        } else {
            let pos = self.cursor_coordinates();
            let len = self.buffer.line(pos.line).map_or(0, |l| l.len());

            if self.buffer.character_index(pos) < len {
                let end = self.buffer.advance(pos);
                record.removed = self.buffer.text(pos, end);
                record.removed_start = pos;
                record.removed_end = end;
                self.buffer.delete_range(pos, end);
            } else if pos.line + 1 < self.buffer.line_count() {
                record.removed = "\n".to_string();
                record.removed_start = pos;
                record.removed_end = Coordinates::new(pos.line + 1, 0);
                self.buffer.join_with_next(pos.line);
            } else {
                return;
            }

            self.set_cursor_position(pos);
            self.collapse_selection_to_cursor();
            self.text_changed = true;
            self.colorize(pos.line, 1);
        }

        record.after = self.state;
        self.undo_log.push(record);
    }

    /// Delete the selected range. No-op without a selection.
    pub fn delete_selection(&mut self) {
        if self.config.read_only || !self.has_selection() {
            return;
        }
        let mut record = UndoRecord::new(self.state);
        record.removed = self.get_selected_text();
        record.removed_start = self.state.selection_start;
        record.removed_end = self.state.selection_end;
        self.remove_selection();
        record.after = self.state;
        self.undo_log.push(record);
    }

    /// Replace the selection with `text` and leave the cursor after it.
    pub fn insert_text(&mut self, text: &str) {
        if self.config.read_only || text.is_empty() {
            return;
        }

        let mut record = UndoRecord::new(self.state);
        if self.has_selection() {
            record.removed = self.get_selected_text();
            record.removed_start = self.state.selection_start;
            record.removed_end = self.state.selection_end;
            self.remove_selection();
        }

        record.added = text.to_string();
        record.added_start = self.cursor_coordinates();
        self.insert_text_at_cursor(text);
        record.added_end = self.cursor_coordinates();
        record.after = self.state;
        self.undo_log.push(record);
    }

    /// Copy the selection to the clipboard.
    pub fn copy(&mut self) {
        if self.has_selection() {
            let text = self.get_selected_text();
            self.clipboard.set_text(&text);
        }
    }

    /// Copy the selection, then delete it.
    pub fn cut(&mut self) {
        if self.config.read_only || !self.has_selection() {
            return;
        }
        self.copy();
        self.delete_selection();
    }

    /// Insert the clipboard text in place of the selection.
    pub fn paste(&mut self) {
        if self.config.read_only {
            return;
        }
        match self.clipboard.get_text() {
            Some(text) if !text.is_empty() => self.insert_text(&text),
            _ => log::debug!("Paste ignored: clipboard is empty"),
        }
    }

    /// Revert up to `steps` edits.
    pub fn undo(&mut self, steps: usize) {
        if self.config.read_only {
            return;
        }
        for _ in 0..steps {
            let Some(record) = self.undo_log.undo_step() else {
                break;
            };
            let (first, last) = record.line_span();
            self.state = record.undo(&mut self.buffer);
            self.colorizer
                .mark_dirty(first.saturating_sub(1), Some(last - first + 3));
            self.after_history_step();
        }
    }

    /// Re-apply up to `steps` undone edits.
    pub fn redo(&mut self, steps: usize) {
        if self.config.read_only {
            return;
        }
        for _ in 0..steps {
            let Some(record) = self.undo_log.redo_step() else {
                break;
            };
            let (first, last) = record.line_span();
            self.state = record.redo(&mut self.buffer);
            self.colorizer
                .mark_dirty(first.saturating_sub(1), Some(last - first + 3));
            self.after_history_step();
        }
    }

    fn after_history_step(&mut self) {
        self.interactive_start = self.state.selection_start;
        self.interactive_end = self.state.selection_end;
        self.text_changed = true;
        self.cursor_position_changed = true;
        self.scroll_to_cursor = true;
    }

    /// Delete the selected range without recording history.
    pub(crate) fn remove_selection(&mut self) {
        if !self.has_selection() {
            return;
        }
        let start = self.state.selection_start;
        self.buffer.delete_range(start, self.state.selection_end);
        self.set_selection(start, start, SelectionMode::Normal);
        self.set_cursor_position(start);
        self.interactive_start = start;
        self.interactive_end = start;
        self.text_changed = true;
        self.colorize(start.line, 1);
    }

    /// Insert at the cursor without recording history.
    fn insert_text_at_cursor(&mut self, text: &str) {
        let mut pos = self.cursor_coordinates();
        let start = pos.min(self.state.selection_start);
        let mut total_lines = pos.line - start.line;

        total_lines += self.buffer.insert_text_at(&mut pos, text);

        self.set_cursor_position(pos);
        self.collapse_selection_to_cursor();
        self.text_changed = true;
        self.colorize(start.line.saturating_sub(1), total_lines + 2);
    }
}
