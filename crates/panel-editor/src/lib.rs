//! Structured script editor for lunar.
//!
//! [`TextEditor`] is an immediate-mode editor core: glyph buffer with error
//! markers, undoable editing operations, word/line selection and an
//! incremental colorizer, drawn once per frame through a [`lunar_core::Ui`].
//! [`EditorPanel`] binds an editor to a script file.

mod click_tracker;
pub mod config;
mod core;
mod cursor;
mod editing;
mod file_io;
pub mod keyboard;
mod mouse;
mod panel;
mod rendering;
mod selection;

#[cfg(test)]
mod test_ui;

// Re-export main types
pub use config::EditorConfig;
pub use self::core::TextEditor;
pub use keyboard::EditorCommand;
pub use panel::EditorPanel;
pub use selection::SelectionMode;
