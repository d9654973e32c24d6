//! Keyboard command handling for the editor.
//!
//! Key parsing is kept apart from command execution: [`EditorCommand::from_key`]
//! holds the whole binding table, [`EditorCommand::execute`] performs the
//! action on a [`TextEditor`].

use lunar_core::{Key, Modifiers, Ui};

use crate::TextEditor;

/// Keys queried each frame, in dispatch priority order. The first pressed key
/// that maps to a command wins.
const BINDING_KEYS: &[Key] = &[
    Key::Char('z'),
    Key::Char('y'),
    Key::Up,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Home,
    Key::End,
    Key::PageUp,
    Key::PageDown,
    Key::Backspace,
    Key::Delete,
    Key::Char('c'),
    Key::Insert,
    Key::Char('v'),
    Key::Char('x'),
    Key::Char('a'),
    Key::Enter,
    Key::Tab,
];

/// Editor command representing a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    // Undo/Redo
    Undo,
    Redo,

    // Navigation (`select` extends the selection, `word` jumps by token)
    MoveUp { select: bool },
    MoveDown { select: bool },
    MoveLeft { select: bool, word: bool },
    MoveRight { select: bool, word: bool },
    MoveHome { select: bool },
    MoveEnd { select: bool },
    PageUp { select: bool },
    PageDown { select: bool },

    // Text editing
    Backspace,
    Delete,
    InsertNewline,
    /// Tab: inserts a tab, or indents/outdents a multi-line selection
    Tab { outdent: bool },

    // Selection
    SelectAll,

    // Clipboard
    Copy,
    Cut,
    Paste,

    // No operation (for unhandled keys)
    None,
}

impl EditorCommand {
    /// Map a key and its modifiers to a command.
    ///
    /// Mutating commands map to [`EditorCommand::None`] when `read_only`.
    pub fn from_key(key: Key, mods: Modifiers, read_only: bool) -> Self {
        let Modifiers { ctrl, shift, alt } = mods;
        let only_ctrl = ctrl && !shift && !alt;
        let only_shift = shift && !ctrl && !alt;
        let plain_or_shift = !ctrl && !alt;

        let command = match key {
            // Ctrl+Z / Ctrl+Y - undo / redo
            Key::Char('z') if only_ctrl => Self::Undo,
            Key::Char('y') if only_ctrl => Self::Redo,

            // Arrows: Shift selects, Ctrl moves by word horizontally
            Key::Up if plain_or_shift => Self::MoveUp { select: shift },
            Key::Down if plain_or_shift => Self::MoveDown { select: shift },
            Key::Left if !alt => Self::MoveLeft {
                select: shift,
                word: ctrl,
            },
            Key::Right if !alt => Self::MoveRight {
                select: shift,
                word: ctrl,
            },
            Key::Home if plain_or_shift => Self::MoveHome { select: shift },
            Key::End if plain_or_shift => Self::MoveEnd { select: shift },
            Key::PageUp if plain_or_shift => Self::PageUp { select: shift },
            Key::PageDown if plain_or_shift => Self::PageDown { select: shift },

            Key::Backspace if mods.is_empty() => Self::Backspace,
            Key::Delete if mods.is_empty() => Self::Delete,

            // Ctrl+C / Ctrl+Insert - copy
            Key::Char('c') if only_ctrl => Self::Copy,
            Key::Insert if only_ctrl => Self::Copy,

            // Shift+Insert / Ctrl+V - paste
            Key::Insert if only_shift => Self::Paste,
            Key::Char('v') if only_ctrl => Self::Paste,

            // Ctrl+X / Shift+Delete - cut
            Key::Char('x') if only_ctrl => Self::Cut,
            Key::Delete if only_shift => Self::Cut,

            Key::Char('a') if only_ctrl => Self::SelectAll,
            Key::Enter if mods.is_empty() => Self::InsertNewline,
            Key::Tab if plain_or_shift => Self::Tab { outdent: shift },

            _ => Self::None,
        };

        if read_only && command.is_mutating() {
            Self::None
        } else {
            command
        }
    }

    /// First command triggered by a key pressed this frame.
    pub fn from_ui(ui: &dyn Ui, read_only: bool) -> Self {
        let mods = ui.modifiers();
        BINDING_KEYS
            .iter()
            .filter(|&&key| ui.is_key_pressed(key))
            .map(|&key| Self::from_key(key, mods, read_only))
            .find(|command| *command != Self::None)
            .unwrap_or(Self::None)
    }

    /// Returns `true` if the command changes the text.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::Undo
                | Self::Redo
                | Self::Backspace
                | Self::Delete
                | Self::InsertNewline
                | Self::Tab { .. }
                | Self::Cut
                | Self::Paste
        )
    }

    /// Execute this command on the given editor.
    pub fn execute(self, editor: &mut TextEditor) {
        match self {
            Self::Undo => editor.undo(1),
            Self::Redo => editor.redo(1),

            Self::MoveUp { select } => editor.move_up(1, select),
            Self::MoveDown { select } => editor.move_down(1, select),
            Self::MoveLeft { select, word } => editor.move_left(1, select, word),
            Self::MoveRight { select, word } => editor.move_right(1, select, word),
            Self::MoveHome { select } => editor.move_home(select),
            Self::MoveEnd { select } => editor.move_end(select),
            Self::PageUp { select } => editor.move_page_up(select),
            Self::PageDown { select } => editor.move_page_down(select),

            Self::Backspace => editor.backspace(),
            Self::Delete => editor.delete(),
            Self::InsertNewline => editor.enter_character('\n', false),
            Self::Tab { outdent } => editor.enter_character('\t', outdent),

            Self::SelectAll => editor.select_all(),

            Self::Copy => editor.copy(),
            Self::Cut => editor.cut(),
            Self::Paste => editor.paste(),

            Self::None => {}
        }
    }
}

impl TextEditor {
    /// Dispatch this frame's key presses, then type the queued characters.
    pub(crate) fn handle_keyboard_inputs(&mut self, ui: &mut dyn Ui) {
        if !ui.is_window_focused() {
            return;
        }

        let command = EditorCommand::from_ui(ui, self.config.read_only);
        if command != EditorCommand::None {
            log::trace!("Editor command {:?}", command);
            command.execute(self);
        }

        let shift = ui.modifiers().shift;
        for ch in ui.take_input_characters() {
            if ch == '\n' || (ch as u32) >= 32 {
                self.enter_character(ch, shift);
            }
        }
    }
}
