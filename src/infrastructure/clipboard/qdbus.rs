//! Klipper IPC adapter using the qdbus command line client
//!
//! Calls go out as argument vectors through the command runner, so the
//! clipboard text never passes through a shell.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::dispatcher::strip_line_terminator;
use crate::application::ports::{
    CommandRunner, CommandSpec, IpcError, KlipperConnector, KlipperProxy, ProcessError,
};
use crate::domain::Timeout;

pub const KLIPPER_SERVICE: &str = "org.kde.klipper";
pub const KLIPPER_PATH: &str = "/klipper";
pub const KLIPPER_INTERFACE: &str = "org.kde.klipper.klipper";

/// Shell exit status for "command found but could not be executed/loaded"
const EXIT_CANNOT_LOAD: i32 = 127;

/// Connects to Klipper through a qdbus-compatible binary
pub struct QdbusKlipperConnector {
    runner: Arc<dyn CommandRunner>,
    timeout: Timeout,
}

impl QdbusKlipperConnector {
    pub fn new(runner: Arc<dyn CommandRunner>, timeout: Timeout) -> Self {
        Self { runner, timeout }
    }
}

#[async_trait]
impl KlipperConnector for QdbusKlipperConnector {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn KlipperProxy>, IpcError> {
        Ok(Box::new(QdbusKlipper {
            runner: Arc::clone(&self.runner),
            binary: endpoint.to_string(),
            timeout: self.timeout,
        }))
    }
}

/// Klipper proxy backed by qdbus calls
pub struct QdbusKlipper {
    runner: Arc<dyn CommandRunner>,
    binary: String,
    timeout: Timeout,
}

impl QdbusKlipper {
    fn argv(&self, method: &str, arg: Option<&str>) -> Vec<String> {
        let mut argv = vec![
            self.binary.clone(),
            KLIPPER_SERVICE.to_string(),
            KLIPPER_PATH.to_string(),
            format!("{}.{}", KLIPPER_INTERFACE, method),
        ];
        if let Some(arg) = arg {
            argv.push(arg.to_string());
        }
        argv
    }

    async fn call(&self, method: &str, arg: Option<&str>) -> Result<String, IpcError> {
        let spec = CommandSpec::new(&self.argv(method, arg), self.timeout);

        let output = self.runner.run(&spec).await.map_err(|e| match e {
            ProcessError::NotFound { program } => {
                IpcError::LibraryMissing(format!("{} is not installed", program))
            }
            other => IpcError::CallFailed(other.to_string()),
        })?;

        match output.exit_code {
            Some(0) => {
                let text = String::from_utf8_lossy(&output.stdout);
                Ok(strip_line_terminator(&text).to_string())
            }
            Some(EXIT_CANNOT_LOAD) => Err(IpcError::LibraryMissing(output.stderr_lossy())),
            _ => Err(IpcError::CallFailed(format!(
                "{} {} failed: {}",
                self.binary,
                method,
                output.stderr_lossy().trim()
            ))),
        }
    }
}

#[async_trait]
impl KlipperProxy for QdbusKlipper {
    async fn get_clipboard_contents(&self) -> Result<String, IpcError> {
        self.call("getClipboardContents", None).await
    }

    async fn set_clipboard_contents(&self, text: &str) -> Result<(), IpcError> {
        self.call("setClipboardContents", Some(text)).await.map(|_| ())
    }
}
