use lunar_buffer::{Coordinates, EditorState, ErrorMarkers, TextBuffer, UndoLog};
use lunar_clipboard::Clipboard;
use lunar_core::{Clock, Vec2};
use lunar_highlight::{Colorizer, LanguageDefinition};
use lunar_theme::Palette;

use crate::click_tracker::ClickTracker;
use crate::config::EditorConfig;
use crate::selection::SelectionMode;

/// Structured text editor rendered through an immediate-mode [`lunar_core::Ui`].
///
/// Owns the glyph buffer, cursor and selection state, undo history and the
/// incremental colorizer. Time and clipboard access go through injected
/// capabilities, so every frame is reproducible under test.
pub struct TextEditor {
    // === Core editing state ===
    pub(crate) config: EditorConfig,
    pub(crate) buffer: TextBuffer,
    pub(crate) state: EditorState,
    pub(crate) undo_log: UndoLog,
    pub(crate) colorizer: Colorizer,
    pub(crate) palette: Palette,

    // === Interaction state ===
    pub(crate) selection_mode: SelectionMode,
    /// Anchor pair the selection is rebuilt from on drag and shift-moves.
    pub(crate) interactive_start: Coordinates,
    pub(crate) interactive_end: Coordinates,
    pub(crate) clicks: ClickTracker,

    // === Capabilities ===
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) clipboard: Box<dyn Clipboard>,

    // === Frame state ===
    /// Monospace advance: `x` is one character, `y` one line.
    pub(crate) char_advance: Vec2,
    /// Width of the line number gutter.
    pub(crate) text_start: f32,
    /// Visible lines in the last frame, used for page moves.
    pub(crate) page_lines: usize,
    pub(crate) blink_start: u64,
    pub(crate) scroll_to_top: bool,
    pub(crate) scroll_to_cursor: bool,
    pub(crate) text_changed: bool,
    pub(crate) cursor_position_changed: bool,
}

impl TextEditor {
    /// Create an empty editor with default configuration.
    pub fn new(clock: Box<dyn Clock>, clipboard: Box<dyn Clipboard>) -> Self {
        Self::with_config(EditorConfig::default(), clock, clipboard)
    }

    pub fn with_config(
        config: EditorConfig,
        clock: Box<dyn Clock>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let blink_start = clock.now_ms();
        let undo_log = UndoLog::with_capacity(config.undo_limit);
        Self {
            config,
            buffer: TextBuffer::new(),
            state: EditorState::default(),
            undo_log,
            colorizer: Colorizer::new(LanguageDefinition::lua()),
            palette: Palette::default(),
            selection_mode: SelectionMode::Normal,
            interactive_start: Coordinates::default(),
            interactive_end: Coordinates::default(),
            clicks: ClickTracker::default(),
            clock,
            clipboard,
            char_advance: Vec2::new(1.0, 1.0),
            text_start: 0.0,
            page_lines: 1,
            blink_start,
            scroll_to_top: false,
            scroll_to_cursor: false,
            text_changed: false,
            cursor_position_changed: false,
        }
    }

    // === Document ===

    /// Replace the whole document. Resets history, cursor and selection and
    /// schedules a full recolorization.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.state = EditorState::default();
        self.interactive_start = Coordinates::default();
        self.interactive_end = Coordinates::default();
        self.selection_mode = SelectionMode::Normal;
        self.undo_log.clear();
        self.text_changed = true;
        self.scroll_to_top = true;
        self.colorizer.mark_all_dirty();
        log::debug!("Editor text replaced: {} lines", self.buffer.line_count());
    }

    /// Whole document; lines joined with `\n`.
    pub fn get_text(&self) -> String {
        self.buffer.full_text()
    }

    pub fn get_selected_text(&self) -> String {
        self.buffer
            .text(self.state.selection_start, self.state.selection_end)
    }

    /// Text of the line under the cursor.
    pub fn get_current_line_text(&self) -> String {
        self.buffer.line_text(self.cursor_coordinates().line)
    }

    /// Token at `at`, as used for double-click selection.
    pub fn get_word_at(&self, at: Coordinates) -> String {
        self.buffer.word_at(self.buffer.sanitize(at))
    }

    pub fn total_lines(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Replace the error markers (1-based line number to message).
    pub fn set_error_markers(&mut self, markers: ErrorMarkers) {
        self.buffer.set_error_markers(markers);
    }

    pub fn error_markers(&self) -> &ErrorMarkers {
        self.buffer.error_markers()
    }

    // === Language and palette ===

    pub fn set_language_definition(&mut self, language: LanguageDefinition) {
        log::info!("Editor language set to '{}'", language.name);
        self.colorizer.set_language(language);
    }

    pub fn language_definition(&self) -> &LanguageDefinition {
        self.colorizer.language()
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Finish every pending colorization step immediately.
    pub fn colorize_all(&mut self) {
        self.colorizer.run_to_completion(&mut self.buffer);
    }

    // === Configuration ===

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.config.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    // === State queries ===

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Text was modified during the last frame (or since `set_text`).
    pub fn is_text_changed(&self) -> bool {
        self.text_changed
    }

    /// Cursor or selection moved during the last frame.
    pub fn is_cursor_position_changed(&self) -> bool {
        self.cursor_position_changed
    }

    pub fn can_undo(&self) -> bool {
        !self.config.read_only && self.undo_log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.config.read_only && self.undo_log.can_redo()
    }

    /// Cursor position clamped into the buffer.
    pub fn get_cursor_position(&self) -> Coordinates {
        self.cursor_coordinates()
    }

    pub fn set_cursor_position(&mut self, position: Coordinates) {
        if self.state.cursor_position != position {
            self.state.cursor_position = position;
            self.cursor_position_changed = true;
            self.scroll_to_cursor = true;
        }
    }

    pub(crate) fn cursor_coordinates(&self) -> Coordinates {
        self.buffer.sanitize(self.state.cursor_position)
    }

    /// Schedule recolorization of `count` lines from `first`.
    pub(crate) fn colorize(&mut self, first: usize, count: usize) {
        self.colorizer.mark_dirty(first, Some(count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_ui::editor;

    #[test]
    fn test_set_text_round_trip() {
        let mut ed = editor("");
        let text = "local x = 1\r\n\tprint(\"héllo\")\n\n-- ok";
        ed.set_text(text);
        assert_eq!(ed.get_text(), text.replace('\r', ""));
        assert_eq!(ed.total_lines(), 4);
        assert!(ed.is_text_changed());
    }

    #[test]
    fn test_set_text_resets_history_and_state() {
        let mut ed = editor("abc");
        ed.set_cursor_position(Coordinates::new(0, 3));
        ed.enter_character('d', false);
        assert!(ed.can_undo());

        ed.set_text("xyz");
        assert!(!ed.can_undo());
        assert_eq!(ed.state(), EditorState::default());
    }

    #[test]
    fn test_cursor_position_is_sanitized() {
        let mut ed = editor("ab\ncd");
        ed.set_cursor_position(Coordinates::new(9, 9));
        assert_eq!(ed.get_cursor_position(), Coordinates::new(1, 2));
    }

    #[test]
    fn test_current_line_and_word() {
        let mut ed = editor("local value = 42");
        ed.colorize_all();
        ed.set_cursor_position(Coordinates::new(0, 8));
        assert_eq!(ed.get_current_line_text(), "local value = 42");
        assert_eq!(ed.get_word_at(Coordinates::new(0, 8)), "value");
    }

    #[test]
    fn test_language_switch_recolorizes() {
        let mut ed = editor("int x;");
        ed.set_language_definition(LanguageDefinition::c_style());
        ed.colorize_all();
        assert_eq!(ed.language_definition().name, "c");
        assert_eq!(
            ed.buffer().lines()[0][0].color,
            lunar_core::PaletteIndex::BlueKeyword
        );
    }
}
