//! Terminal host: owns the panels and runs the frame loop.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Rect},
    style::{Color as TermColor, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use lunar_core::{PaletteIndex, PanelList};
use lunar_panel_editor::EditorPanel;

use crate::event::{Event, EventHandler};
use crate::terminal_ui::{ChildState, FrameInput, TerminalUi};

/// Roughly 60 frames per second while idle.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main application
pub struct App {
    panels: PanelList,
    input: FrameInput,
    children: HashMap<String, ChildState>,
    event_handler: EventHandler,
    double_click_ms: u64,
    /// Transient message shown in the status line
    message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(editor: EditorPanel, double_click_ms: u64) -> Self {
        let mut panels = PanelList::new();
        panels.add_panel(Box::new(editor));
        Self {
            panels,
            input: FrameInput::default(),
            children: HashMap::new(),
            event_handler: EventHandler::new(FRAME_INTERVAL),
            double_click_ms,
            message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            match self.event_handler.next()? {
                Event::Key(key) => {
                    if !self.handle_host_key(key) {
                        self.input.push_key(key);
                    }
                }
                Event::Mouse(mouse) => self.input.push_mouse(mouse),
                Event::Paste(text) => self.input.push_paste(&text),
                Event::FocusGained => self.input.focused = true,
                Event::FocusLost => self.input.focused = false,
                // every iteration draws a frame, which drives blink and colorizing
                Event::Resize | Event::Tick => {}
            }

            terminal.draw(|frame| self.draw(frame))?;
            self.input.end_frame();
        }

        log::info!("Shutting down");
        Ok(())
    }

    /// Shortcuts handled by the host before the editor sees them.
    fn handle_host_key(&mut self, key: KeyEvent) -> bool {
        if !key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('s') => {
                self.save();
                true
            }
            _ => false,
        }
    }

    fn save(&mut self) {
        let Some(panel) = self.panels.find_mut::<EditorPanel>() else {
            return;
        };
        self.message = Some(match panel.save_file() {
            Ok(()) => format!("Saved {}", panel.title()),
            Err(e) => {
                log::error!("Save failed: {:#}", e);
                format!("Save failed: {:#}", e)
            }
        });
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [main, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let mut ui = TerminalUi::new(
            frame.buffer_mut(),
            main,
            &mut self.input,
            &mut self.children,
            self.double_click_ms,
        );
        self.panels.render_all(&mut ui);
        ui.finish();

        self.draw_status(frame, status);
    }

    fn draw_status(&mut self, frame: &mut Frame, area: Rect) {
        let Some(panel) = self.panels.find_mut::<EditorPanel>() else {
            return;
        };
        let editor = panel.editor();
        let cursor = editor.get_cursor_position();
        let accent = editor.palette().get(PaletteIndex::LineNumber);
        let background = editor.palette().get(PaletteIndex::Background);

        let mut left = format!(" {}", panel.title());
        if panel.is_modified() {
            left.push_str(" *");
        }
        if editor.is_read_only() {
            left.push_str(" [RO]");
        }
        let right = format!(
            "{}  Ln {}, Col {}  {} ",
            self.message.as_deref().unwrap_or("Ctrl+S save  Ctrl+Q quit"),
            cursor.line + 1,
            cursor.column + 1,
            editor.language_definition().name,
        );

        let style = Style::default()
            .fg(TermColor::Rgb(background.r, background.g, background.b))
            .bg(TermColor::Rgb(accent.r, accent.g, accent.b));
        let used = left.chars().count() + right.chars().count();
        let padding = (area.width as usize).saturating_sub(used);
        let line = Line::from(vec![
            Span::raw(left),
            Span::raw(" ".repeat(padding)),
            Span::raw(right),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
