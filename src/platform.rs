//! Seams to the two platform primitives the app needs: the system clipboard
//! and the OS "open this URL" handler.
//!
//! Both are traits so the orchestration layer can be tested without a
//! display server or a browser.

use std::sync::{Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
#[error("failed to launch browser: {0}")]
pub struct OpenError(#[from] pub std::io::Error);

/// Writes text to a clipboard. Called from the blocking thread pool.
pub trait ClipboardBackend: Send + Sync + 'static {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Hands a URL to whatever opens links on this machine.
pub trait BrowserOpener: Send + Sync + 'static {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// System clipboard via `arboard`.
///
/// The handle is created on first use and kept for the whole session. On
/// X11 the copied text is only served while a handle is alive, so dropping
/// it after each write would empty the clipboard.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self.handle.lock().unwrap_or_else(PoisonError::into_inner);

        let mut clipboard = match slot.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?,
        };

        // A handle that failed a write is dropped and reconnected next time
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
        *slot = Some(clipboard);
        Ok(())
    }
}

/// Default browser via the `open` crate. Does not wait for the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        open::that_detached(url)?;
        Ok(())
    }
}
