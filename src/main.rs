mod app;
mod event;
mod terminal_ui;

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use lunar_config::Config;
use lunar_core::SystemClock;
use lunar_highlight::LanguageDefinition;
use lunar_logger::LogLevel;
use lunar_panel_editor::{EditorConfig, EditorPanel, TextEditor};
use lunar_theme::Palette;

use crate::app::App;

/// Build the editor panel from the configuration and the optional file argument.
fn create_editor_panel(config: &Config, file: Option<PathBuf>) -> Result<EditorPanel> {
    let themes_dir = Config::get_themes_dir().ok();
    let palette = Palette::get_by_name(&config.editor.theme, themes_dir.as_deref());

    let mut editor = TextEditor::with_config(
        EditorConfig::from_settings(&config.editor),
        Box::new(SystemClock::new()),
        lunar_clipboard::system_or_memory(),
    );
    editor.set_palette(palette);
    match LanguageDefinition::by_name(&config.editor.language) {
        Some(language) => editor.set_language_definition(language),
        None => log::warn!(
            "Unknown language '{}', keeping {}",
            config.editor.language,
            editor.language_definition().name
        ),
    }

    let mut panel = EditorPanel::new(editor);
    if let Some(path) = file {
        if path.exists() {
            panel.open_file(&path)?;
        } else {
            log::info!("{} does not exist yet, it will be created on save", path.display());
            panel.set_file_path(path);
        }
    }
    Ok(panel)
}

fn main() -> Result<()> {
    // Load config first, logging and theme depend on it
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {:#}", e);
        Config::default()
    });

    let log_path = config
        .log_file_path()
        .unwrap_or_else(|_| std::env::temp_dir().join("lunar.log"));
    let min_level = config.logging.min_level.parse().unwrap_or(LogLevel::Info);
    lunar_logger::init(log_path, config.logging.max_entries, min_level);
    log::info!("Starting lunar {}", env!("CARGO_PKG_VERSION"));

    let file = std::env::args_os().nth(1).map(PathBuf::from);
    let panel = create_editor_panel(&config, file)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    // Kitty keyboard protocol keeps Ctrl+letter combinations distinguishable
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);

    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;

    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(panel, config.editor.double_click_ms);
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    // Print error if there was one
    if let Err(err) = result {
        log::error!("Fatal: {:#}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
