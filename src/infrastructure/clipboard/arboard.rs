//! Native clipboard backend using arboard
//!
//! Backs the Windows engine. arboard also works on macOS and Linux, but the
//! resolver only binds it on Windows.

use async_trait::async_trait;

use crate::application::ports::{NativeClipboard, NativeClipboardError};

/// Native clipboard adapter using arboard
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn open() -> Result<arboard::Clipboard, NativeClipboardError> {
    arboard::Clipboard::new().map_err(|e| NativeClipboardError::ClipboardUnavailable(e.to_string()))
}

#[async_trait]
impl NativeClipboard for ArboardClipboard {
    async fn paste(&self) -> Result<String, NativeClipboardError> {
        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(|| {
            let mut clipboard = open()?;

            match clipboard.get_text() {
                Ok(text) => Ok(text),
                // Images and files are not text
                Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
                Err(e) => Err(NativeClipboardError::PasteFailed(e.to_string())),
            }
        })
        .await
        .map_err(|e| NativeClipboardError::PasteFailed(format!("Task join error: {}", e)))?
    }

    async fn copy(&self, text: &str) -> Result<(), NativeClipboardError> {
        let text = text.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = open()?;

            clipboard
                .set_text(text)
                .map_err(|e| NativeClipboardError::CopyFailed(e.to_string()))
        })
        .await
        .map_err(|e| NativeClipboardError::CopyFailed(format!("Task join error: {}", e)))?
    }
}
