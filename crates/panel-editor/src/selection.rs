//! Selection handling for the editor.
//!
//! Raw ranges from the mouse or keyboard are sanitized, ordered and then
//! snapped to word or line boundaries according to the [`SelectionMode`].

use lunar_buffer::Coordinates;

use crate::TextEditor;

/// Granularity a raw selection range snaps to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Character granularity, no snapping.
    #[default]
    Normal,
    /// Snap to token edges.
    Word,
    /// Snap to whole lines.
    Line,
}

impl TextEditor {
    /// Select `[start, end)` in `mode`. Endpoints are clamped and swapped
    /// when reversed.
    pub fn set_selection(&mut self, start: Coordinates, end: Coordinates, mode: SelectionMode) {
        let old_start = self.state.selection_start;
        let old_end = self.state.selection_end;

        let mut start = self.buffer.sanitize(start);
        let mut end = self.buffer.sanitize(end);
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }

        match mode {
            SelectionMode::Normal => {}
            SelectionMode::Word => {
                start = self.buffer.find_word_start(start);
                if !self.buffer.is_on_word_boundary(end) {
                    end = self.buffer.find_word_end(self.buffer.find_word_start(end));
                }
            }
            SelectionMode::Line => {
                start = Coordinates::new(start.line, 0);
                end = Coordinates::new(end.line, self.buffer.line_max_column(end.line));
            }
        }

        self.state.selection_start = start;
        self.state.selection_end = end;

        if start != old_start || end != old_end {
            self.cursor_position_changed = true;
        }
    }

    pub fn set_selection_start(&mut self, position: Coordinates) {
        let end = self.state.selection_end;
        self.set_selection(position, end, SelectionMode::Normal);
    }

    pub fn set_selection_end(&mut self, position: Coordinates) {
        let start = self.state.selection_start;
        self.set_selection(start, position, SelectionMode::Normal);
    }

    /// Returns `true` if the selection spans at least one position.
    pub fn has_selection(&self) -> bool {
        self.state.selection_end > self.state.selection_start
    }

    pub fn select_all(&mut self) {
        let end = Coordinates::new(self.buffer.line_count(), 0);
        self.set_selection(Coordinates::default(), end, SelectionMode::Normal);
    }

    /// Select the token under the cursor.
    pub fn select_word_under_cursor(&mut self) {
        let cursor = self.cursor_coordinates();
        let start = self.buffer.find_word_start(cursor);
        let end = self.buffer.find_word_end(cursor);
        self.set_selection(start, end, SelectionMode::Normal);
    }

    /// Collapse the selection onto the cursor and reset the anchors.
    pub(crate) fn collapse_selection_to_cursor(&mut self) {
        let cursor = self.state.cursor_position;
        self.interactive_start = cursor;
        self.interactive_end = cursor;
        self.set_selection(cursor, cursor, SelectionMode::Normal);
    }
}
