//! Script editor panel: a [`TextEditor`] bound to an optional file.

use std::any::Any;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lunar_core::{Panel, Ui, Vec2};
use lunar_highlight::{detect_language, LanguageDefinition};

use crate::file_io;
use crate::TextEditor;

const UNTITLED: &str = "Untitled";

/// Panel hosting one editor and the file it was loaded from.
pub struct EditorPanel {
    editor: TextEditor,
    file_path: Option<PathBuf>,
    title: String,
    /// Text changed since the last open, save or clear.
    modified: bool,
}

impl EditorPanel {
    pub fn new(editor: TextEditor) -> Self {
        Self {
            editor,
            file_path: None,
            title: UNTITLED.to_string(),
            modified: false,
        }
    }

    /// Empty the editor and detach it from its file.
    pub fn clear(&mut self) {
        self.editor.set_text("");
        self.file_path = None;
        self.title = UNTITLED.to_string();
        self.modified = false;
    }

    /// Load `path` into the editor.
    ///
    /// The language follows the file extension when it is recognized, and a
    /// read-only file puts the editor in read-only mode.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = file_io::read_script(path)
            .with_context(|| format!("Cannot open {}", path.display()))?;

        self.editor.set_text(&text);
        if let Some(language) = detect_language(path).and_then(LanguageDefinition::by_name) {
            self.editor.set_language_definition(language);
        }
        if file_io::is_file_readonly(path) {
            log::info!("{} is read-only, editing disabled", path.display());
            self.editor.set_read_only(true);
        }

        self.title = file_io::path_to_title(path);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        log::info!(
            "Opened {} ({} lines)",
            path.display(),
            self.editor.total_lines()
        );
        Ok(())
    }

    /// Write the text back to the file it was opened from.
    pub fn save_file(&mut self) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .context("No file path set, use save as")?;
        self.write_to(&path)
    }

    /// Write the text to `path` and make it the panel's file.
    pub fn save_file_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.title = file_io::path_to_title(path);
        self.file_path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        file_io::write_script(path, &self.editor.get_text())?;
        self.modified = false;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    /// Bind the panel to a file that does not exist yet; the first save creates it.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Some(language) = detect_language(&path).and_then(LanguageDefinition::by_name) {
            self.editor.set_language_definition(language);
        }
        self.title = file_io::path_to_title(&path);
        self.file_path = Some(path);
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TextEditor {
        &mut self.editor
    }
}

impl Panel for EditorPanel {
    fn name(&self) -> &str {
        &self.title
    }

    fn render(&mut self, ui: &mut dyn Ui) {
        self.editor.render(ui, &self.title, Vec2::ZERO, false);
        if self.editor.is_text_changed() {
            self.modified = true;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
