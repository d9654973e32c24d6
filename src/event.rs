//! Crossterm events narrowed to what the frame loop reacts to.

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press or repeat
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    FocusGained,
    FocusLost,
    /// Bracketed paste
    Paste(String),
    /// No input within the frame interval; a frame is still drawn
    Tick,
}

impl Event {
    /// Map a terminal event, dropping key releases.
    fn translate(raw: CrosstermEvent) -> Self {
        match raw {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
            CrosstermEvent::Key(_) => Event::Tick,
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(..) => Event::Resize,
            CrosstermEvent::FocusGained => Event::FocusGained,
            CrosstermEvent::FocusLost => Event::FocusLost,
            CrosstermEvent::Paste(text) => Event::Paste(text),
        }
    }
}

/// Polls the terminal with a frame-sized timeout.
pub struct EventHandler {
    frame_interval: Duration,
}

impl EventHandler {
    pub fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }

    /// Wait at most one frame interval for the next event.
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.frame_interval)? {
            Ok(Event::translate(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }
}
