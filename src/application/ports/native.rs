//! Native clipboard backend port (Windows engine)

use async_trait::async_trait;
use thiserror::Error;

/// Native clipboard errors
#[derive(Debug, Clone, Error)]
pub enum NativeClipboardError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    PasteFailed(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for an in-process clipboard API
#[async_trait]
pub trait NativeClipboard: Send + Sync {
    /// Read clipboard text. Non-text content yields an empty string.
    async fn paste(&self) -> Result<String, NativeClipboardError>;

    /// Replace the clipboard with `text`.
    async fn copy(&self, text: &str) -> Result<(), NativeClipboardError>;
}
