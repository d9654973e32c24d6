use crate::{Coordinates, TextBuffer};

/// Cursor and selection snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorState {
    pub selection_start: Coordinates,
    pub selection_end: Coordinates,
    pub cursor_position: Coordinates,
}

/// One invertible edit.
///
/// Undo deletes `added` then re-inserts `removed`; redo does the reverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoRecord {
    pub added: String,
    pub added_start: Coordinates,
    pub added_end: Coordinates,

    pub removed: String,
    pub removed_start: Coordinates,
    pub removed_end: Coordinates,

    pub before: EditorState,
    pub after: EditorState,
}

impl UndoRecord {
    pub fn new(before: EditorState) -> Self {
        Self {
            before,
            ..Self::default()
        }
    }

    /// Revert the edit on `buffer` and return the state to restore.
    pub fn undo(&self, buffer: &mut TextBuffer) -> EditorState {
        if !self.added.is_empty() {
            buffer.delete_range(self.added_start, self.added_end);
        }
        if !self.removed.is_empty() {
            let mut at = self.removed_start;
            buffer.insert_text_at(&mut at, &self.removed);
        }
        self.before
    }

    /// Re-apply the edit on `buffer` and return the state to restore.
    pub fn redo(&self, buffer: &mut TextBuffer) -> EditorState {
        if !self.removed.is_empty() {
            buffer.delete_range(self.removed_start, self.removed_end);
        }
        if !self.added.is_empty() {
            let mut at = self.added_start;
            buffer.insert_text_at(&mut at, &self.added);
        }
        self.after
    }

    /// Lines touched by the record as `(first, last)`, inclusive.
    pub fn line_span(&self) -> (usize, usize) {
        let mut first = usize::MAX;
        let mut last = 0;
        if !self.added.is_empty() {
            first = first.min(self.added_start.line);
            last = last.max(self.added_end.line);
        }
        if !self.removed.is_empty() {
            first = first.min(self.removed_start.line);
            last = last.max(self.removed_end.line);
        }
        if first == usize::MAX {
            let line = self.before.cursor_position.line;
            (line, line)
        } else {
            (first, last)
        }
    }
}

/// Edit history with a movable index.
///
/// Records before the index can be undone, records from the index onward can
/// be redone. Pushing a record discards the redo tail.
#[derive(Debug, Clone)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
    index: usize,
    /// Maximum number of records kept; 0 means unlimited.
    max_size: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    /// Create an unbounded log.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a log with a record limit (0 = unlimited).
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            records: Vec::new(),
            index: 0,
            max_size,
        }
    }

    /// Append a record, truncating anything that could still be redone.
    pub fn push(&mut self, record: UndoRecord) {
        self.records.truncate(self.index);
        self.records.push(record);
        if self.max_size > 0 && self.records.len() > self.max_size {
            let overflow = self.records.len() - self.max_size;
            self.records.drain(..overflow);
        }
        self.index = self.records.len();
    }

    /// Step back and return the record to undo.
    pub fn undo_step(&mut self) -> Option<&UndoRecord> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.records.get(self.index)
    }

    /// Step forward and return the record to redo.
    pub fn redo_step(&mut self) -> Option<&UndoRecord> {
        if self.index >= self.records.len() {
            return None;
        }
        self.index += 1;
        self.records.get(self.index - 1)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the undo/redo boundary.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    fn insert_record(text: &str, start: Coordinates, end: Coordinates) -> UndoRecord {
        UndoRecord {
            added: text.to_string(),
            added_start: start,
            added_end: end,
            ..UndoRecord::default()
        }
    }

    #[test]
    fn test_undo_redo_insert() {
        let mut buffer = TextBuffer::from_text("ac");
        let mut at = c(0, 1);
        buffer.insert_text_at(&mut at, "b\nB");
        let record = insert_record("b\nB", c(0, 1), at);

        record.undo(&mut buffer);
        assert_eq!(buffer.full_text(), "ac");
        record.redo(&mut buffer);
        assert_eq!(buffer.full_text(), "ab\nBc");
    }

    #[test]
    fn test_undo_redo_removal() {
        let mut buffer = TextBuffer::from_text("hello\nworld");
        let removed = buffer.text(c(0, 3), c(1, 2));
        buffer.delete_range(c(0, 3), c(1, 2));
        let record = UndoRecord {
            removed,
            removed_start: c(0, 3),
            removed_end: c(1, 2),
            ..UndoRecord::default()
        };

        record.undo(&mut buffer);
        assert_eq!(buffer.full_text(), "hello\nworld");
        record.redo(&mut buffer);
        assert_eq!(buffer.full_text(), "helrld");
    }

    #[test]
    fn test_restores_states() {
        let before = EditorState {
            cursor_position: c(0, 1),
            ..EditorState::default()
        };
        let mut record = UndoRecord::new(before);
        record.after.cursor_position = c(0, 2);
        let mut buffer = TextBuffer::new();
        assert_eq!(record.undo(&mut buffer), before);
        assert_eq!(record.redo(&mut buffer).cursor_position, c(0, 2));
    }

    #[test]
    fn test_log_index_movement() {
        let mut log = UndoLog::new();
        assert!(!log.can_undo());
        log.push(insert_record("a", c(0, 0), c(0, 1)));
        log.push(insert_record("b", c(0, 1), c(0, 2)));
        assert_eq!(log.index(), 2);

        assert_eq!(log.undo_step().map(|r| r.added.as_str()), Some("b"));
        assert!(log.can_redo());
        assert_eq!(log.redo_step().map(|r| r.added.as_str()), Some("b"));
        assert!(log.redo_step().is_none());
    }

    #[test]
    fn test_push_truncates_redo_tail() {
        let mut log = UndoLog::new();
        log.push(insert_record("a", c(0, 0), c(0, 1)));
        log.push(insert_record("b", c(0, 1), c(0, 2)));
        log.undo_step();
        log.undo_step();
        log.push(insert_record("z", c(0, 0), c(0, 1)));
        assert_eq!(log.len(), 1);
        assert!(!log.can_redo());
    }

    #[test]
    fn test_default_log_is_unbounded() {
        let mut log = UndoLog::new();
        for _ in 0..5000 {
            log.push(insert_record("a", c(0, 0), c(0, 1)));
        }
        assert_eq!(log.len(), 5000);
        assert_eq!(log.index(), 5000);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = UndoLog::with_capacity(2);
        for text in ["a", "b", "c"] {
            log.push(insert_record(text, c(0, 0), c(0, 1)));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.undo_step().map(|r| r.added.as_str()), Some("c"));
        assert_eq!(log.undo_step().map(|r| r.added.as_str()), Some("b"));
        assert!(log.undo_step().is_none());
    }

    #[test]
    fn test_line_span() {
        let record = UndoRecord {
            added: "x\ny".into(),
            added_start: c(3, 0),
            added_end: c(4, 1),
            removed: "q".into(),
            removed_start: c(2, 5),
            removed_end: c(2, 6),
            ..UndoRecord::default()
        };
        assert_eq!(record.line_span(), (2, 4));
    }
}
