//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: child processes,
//! the host environment, Klipper over qdbus, arboard and the XDG config file.

pub mod clipboard;
pub mod config;
pub mod environment;
pub mod process;

use std::sync::Arc;

use crate::application::ports::CommandRunner;
use crate::application::Collaborators;
use crate::domain::EnginePolicy;

pub use clipboard::{ArboardClipboard, QdbusKlipperConnector};
pub use config::XdgConfigStore;
pub use environment::SystemEnvironment;
pub use process::TokioCommandRunner;

/// Wire the real adapters together
pub fn system_collaborators(policy: &EnginePolicy) -> Collaborators {
    let runner: Arc<dyn CommandRunner> = Arc::new(TokioCommandRunner::new());

    Collaborators {
        environment: Arc::new(SystemEnvironment::new()),
        klipper: Arc::new(QdbusKlipperConnector::new(Arc::clone(&runner), policy.timeout)),
        native: Arc::new(ArboardClipboard::new()),
        runner,
    }
}
