//! Clipboard session
//!
//! Holds what the probe saw and the engine the resolver committed to.
//! `get`/`set` refuse to run until `init` has resolved an engine, and the
//! engine never changes afterwards unless `init` runs again.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{ClipboardError, Desktop, DisplayServer, Engine, EnginePolicy, OsName};

use super::dispatcher::{Dispatcher, Resolution};
use super::ports::{CommandRunner, Environment, KlipperConnector, NativeClipboard};
use super::probe::{probe, ProbeReport};
use super::resolver::resolve_engine;

/// The external collaborators a session drives
#[derive(Clone)]
pub struct Collaborators {
    pub environment: Arc<dyn Environment>,
    pub runner: Arc<dyn CommandRunner>,
    pub klipper: Arc<dyn KlipperConnector>,
    pub native: Arc<dyn NativeClipboard>,
}

/// Snapshot of a session for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub os: OsName,
    pub display_server: DisplayServer,
    pub desktop: Desktop,
    pub engine: Option<Engine>,
    pub initialized: bool,
    pub debug: bool,
}

/// A clipboard session bound to one resolved engine
pub struct Session {
    collaborators: Collaborators,
    policy: EnginePolicy,
    report: ProbeReport,
    resolution: Option<Resolution>,
    debug: bool,
}

impl Session {
    /// Create an uninitialized session. The environment is probed right away,
    /// but no engine is resolved until `init`.
    pub fn new(collaborators: Collaborators, policy: EnginePolicy) -> Self {
        let report = probe(collaborators.environment.as_ref());
        Self {
            collaborators,
            policy,
            report,
            resolution: None,
            debug: false,
        }
    }

    /// Detect the clipboard engine for this machine.
    ///
    /// Calling it again re-probes and re-resolves. On failure the session is
    /// left uninitialized.
    pub async fn init(&mut self, debug: bool) -> Result<(), ClipboardError> {
        self.debug = debug;
        self.resolution = None;
        self.report = probe(self.collaborators.environment.as_ref());

        let resolution = resolve_engine(&self.report, &self.collaborators, &self.policy).await?;

        if debug {
            info!(
                engine = %resolution.engine,
                os = %self.report.os,
                display_server = %self.report.display_server,
                desktop = %self.report.desktop,
                "clipboard engine resolved"
            );
        } else {
            debug!(engine = %resolution.engine, "clipboard engine resolved");
        }

        self.resolution = Some(resolution);
        Ok(())
    }

    /// Clipboard content as text. Non-text content reads as an empty string.
    pub async fn get(&self) -> Result<String, ClipboardError> {
        let resolution = self.resolved()?;
        self.dispatcher().get(resolution).await
    }

    /// Put `text` on the clipboard. `None` fails with `TextNotSpecified`.
    pub async fn set(&self, text: Option<&str>) -> Result<(), ClipboardError> {
        let resolution = self.resolved()?;
        let text = text.ok_or(ClipboardError::TextNotSpecified)?;
        self.dispatcher().set(resolution, text).await
    }

    pub async fn paste(&self) -> Result<String, ClipboardError> {
        self.get().await
    }

    /// Put the textual form of `value` on the clipboard
    pub async fn copy<T: fmt::Display + ?Sized>(&self, value: &T) -> Result<(), ClipboardError> {
        let text = value.to_string();
        self.set(Some(&text)).await
    }

    pub fn engine(&self) -> Option<Engine> {
        self.resolution.as_ref().map(|r| r.engine)
    }

    pub fn is_initialized(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            os: self.report.os.clone(),
            display_server: self.report.display_server.clone(),
            desktop: self.report.desktop.clone(),
            engine: self.engine(),
            initialized: self.is_initialized(),
            debug: self.debug,
        }
    }

    fn resolved(&self) -> Result<&Resolution, ClipboardError> {
        self.resolution.as_ref().ok_or(ClipboardError::NotInitialized)
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self.collaborators.runner.as_ref(), &self.policy)
    }
}
