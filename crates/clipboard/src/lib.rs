//! Clipboard capability for lunar.
//!
//! The editor talks to a [`Clipboard`] it is handed by the host.
//! [`SystemClipboard`] uses arboard; on Linux it writes both CLIPBOARD and
//! PRIMARY selections. [`MemoryClipboard`] keeps text in process.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

#[cfg(target_os = "linux")]
use arboard::{GetExtLinux, LinuxClipboardKind, SetExtLinux};

/// Text clipboard used by copy, cut and paste.
pub trait Clipboard {
    /// Current clipboard text, `None` when empty or unavailable.
    fn get_text(&mut self) -> Option<String>;

    /// Replace the clipboard text. Failures are logged, not returned.
    fn set_text(&mut self, text: &str);
}

/// System clipboard backed by arboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    /// On Linux, tries CLIPBOARD selection first, then falls back to PRIMARY.
    fn get_text(&mut self) -> Option<String> {
        #[cfg(target_os = "linux")]
        {
            if let Ok(text) = self
                .inner
                .get()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text()
            {
                if !text.is_empty() {
                    return Some(text);
                }
            }

            self.inner
                .get()
                .clipboard(LinuxClipboardKind::Primary)
                .text()
                .ok()
        }

        #[cfg(not(target_os = "linux"))]
        self.inner.get_text().ok()
    }

    fn set_text(&mut self, text: &str) {
        #[cfg(target_os = "linux")]
        {
            // CLIPBOARD selection (Ctrl+C/V)
            if let Err(e) = self
                .inner
                .set()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text(text.to_string())
            {
                log::warn!("Failed to set clipboard text: {}", e);
                return;
            }

            // PRIMARY selection (middle-click)
            let _ = self
                .inner
                .set()
                .clipboard(LinuxClipboardKind::Primary)
                .text(text.to_string());
        }

        #[cfg(not(target_os = "linux"))]
        if let Err(e) = self.inner.set_text(text) {
            log::warn!("Failed to set clipboard text: {}", e);
        }
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let clipboard = Self::new();
        if let Ok(mut guard) = clipboard.text.lock() {
            *guard = Some(text.to_string());
        }
        clipboard
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.lock().ok()?.clone()
    }

    fn set_text(&mut self, text: &str) {
        if let Ok(mut guard) = self.text.lock() {
            *guard = Some(text.to_string());
        }
    }
}

/// Open the system clipboard, falling back to an in-process one when no
/// clipboard service is reachable (headless sessions).
pub fn system_or_memory() -> Box<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            log::warn!("{:#}; using in-process clipboard", e);
            Box::new(MemoryClipboard::new())
        }
    }
}
