//! KDE/Plasma Klipper IPC port

use async_trait::async_trait;
use thiserror::Error;

/// Klipper IPC errors
#[derive(Debug, Clone, Error)]
pub enum IpcError {
    /// The local D-Bus client is missing or cannot load
    #[error("D-Bus client unavailable: {0}")]
    LibraryMissing(String),

    #[error("Klipper call failed: {0}")]
    CallFailed(String),
}

/// Proxy to the Klipper clipboard object on the session bus
#[async_trait]
pub trait KlipperProxy: Send + Sync {
    async fn get_clipboard_contents(&self) -> Result<String, IpcError>;

    async fn set_clipboard_contents(&self, text: &str) -> Result<(), IpcError>;
}

/// Creates Klipper proxies through an IPC endpoint binary
#[async_trait]
pub trait KlipperConnector: Send + Sync {
    /// Connect through `endpoint`, the IPC binary found on the search path
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn KlipperProxy>, IpcError>;
}
