//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod command;
pub mod config;
pub mod environment;
pub mod klipper;
pub mod native;

// Re-export common types
pub use command::{CommandOutput, CommandRunner, CommandSpec, ProcessError};
pub use config::ConfigStore;
pub use environment::Environment;
pub use klipper::{IpcError, KlipperConnector, KlipperProxy};
pub use native::{NativeClipboard, NativeClipboardError};
