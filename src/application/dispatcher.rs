//! Dispatcher: routes get/set to the resolved engine
//!
//! Subprocess engines share one invocation contract: a bounded attempt,
//! retried after a timeout, with non-zero exits surfaced as engine errors.
//! Each engine's output quirks are normalized here so callers always see
//! plain text.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{ClipboardError, Engine, EnginePolicy, Invocation};

use super::ports::{
    CommandOutput, CommandRunner, CommandSpec, KlipperProxy, NativeClipboard, ProcessError,
};

/// What wl-paste prints on stderr when the clipboard is empty
pub const WL_NOTHING_COPIED: &str = "Nothing is copied";

/// Handle an engine needs beyond its command recipe
pub enum Backend {
    /// Engine is driven purely through its command recipe
    Process,
    Klipper(Box<dyn KlipperProxy>),
    Native(Arc<dyn NativeClipboard>),
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Process => write!(f, "Process"),
            Backend::Klipper(_) => write!(f, "Klipper(..)"),
            Backend::Native(_) => write!(f, "Native(..)"),
        }
    }
}

/// A committed engine together with its bound handle
#[derive(Debug)]
pub struct Resolution {
    pub engine: Engine,
    pub backend: Backend,
}

impl Resolution {
    pub fn process(engine: Engine) -> Self {
        Self {
            engine,
            backend: Backend::Process,
        }
    }

    pub fn klipper(proxy: Box<dyn KlipperProxy>) -> Self {
        Self {
            engine: Engine::Klipper,
            backend: Backend::Klipper(proxy),
        }
    }

    pub fn native(handle: Arc<dyn NativeClipboard>) -> Self {
        Self {
            engine: Engine::WindowsNative,
            backend: Backend::Native(handle),
        }
    }
}

/// Routes clipboard calls to a resolved engine
pub struct Dispatcher<'a> {
    runner: &'a dyn CommandRunner,
    policy: &'a EnginePolicy,
}

impl<'a> Dispatcher<'a> {
    pub fn new(runner: &'a dyn CommandRunner, policy: &'a EnginePolicy) -> Self {
        Self { runner, policy }
    }

    /// Read the clipboard as text
    pub async fn get(&self, resolution: &Resolution) -> Result<String, ClipboardError> {
        let engine = resolution.engine;
        match (engine.read(), &resolution.backend) {
            (Invocation::Command(argv), Backend::Process) => {
                let spec = CommandSpec::new(argv, self.policy.timeout);
                let output = self.run_with_retry(&spec, self.policy.attempts()).await?;
                interpret_read(engine, &spec, output)
            }
            (Invocation::Ipc, Backend::Klipper(proxy)) => proxy
                .get_clipboard_contents()
                .await
                .map_err(|e| ClipboardError::engine(format!("Klipper read failed: {}", e))),
            (Invocation::Native, Backend::Native(handle)) => handle
                .paste()
                .await
                .map_err(|e| ClipboardError::engine(format!("Native clipboard backend failed: {}", e))),
            (_, backend) => Err(unbound(engine, backend)),
        }
    }

    /// Replace the clipboard with `text`
    pub async fn set(&self, resolution: &Resolution, text: &str) -> Result<(), ClipboardError> {
        let engine = resolution.engine;
        match (engine.write(), &resolution.backend) {
            (Invocation::Command(argv), Backend::Process) => {
                let spec = CommandSpec::new(argv, self.policy.timeout)
                    .with_stdin(text.as_bytes())
                    .discard_output();

                let output = if engine == Engine::WlClipboard {
                    // wl-copy may stay around to serve the selection
                    match self.runner.run(&spec).await {
                        Err(ProcessError::TimedOut(_)) => {
                            debug!("wl-copy timed out while serving the selection, treating as copied");
                            return Ok(());
                        }
                        other => other.map_err(|e| spawn_failure(&spec, e))?,
                    }
                } else {
                    self.run_with_retry(&spec, self.policy.attempts()).await?
                };

                if !output.success() {
                    return Err(ClipboardError::Engine {
                        message: format!(
                            "Command \"{}\" returned non-zero exit status: {}.",
                            spec.display(),
                            exit_status(&output)
                        ),
                        exit_code: output.exit_code,
                        stderr: output.stderr_lossy(),
                    });
                }
                Ok(())
            }
            (Invocation::Ipc, Backend::Klipper(proxy)) => proxy
                .set_clipboard_contents(text)
                .await
                .map_err(|e| ClipboardError::engine(format!("Klipper write failed: {}", e))),
            (Invocation::Native, Backend::Native(handle)) => handle
                .copy(text)
                .await
                .map_err(|e| ClipboardError::engine(format!("Native clipboard backend failed: {}", e))),
            (_, backend) => Err(unbound(engine, backend)),
        }
    }

    /// Run an engine's read recipe exactly once, as a liveness check
    pub async fn probe_read(&self, engine: Engine) -> Result<String, ClipboardError> {
        match engine.read() {
            Invocation::Command(argv) => {
                let spec = CommandSpec::new(argv, self.policy.timeout);
                let output = self.run_with_retry(&spec, 1).await?;
                interpret_read(engine, &spec, output)
            }
            _ => Err(ClipboardError::Unknown(format!(
                "engine {} has no command to probe",
                engine
            ))),
        }
    }

    /// Run `spec`, retrying only when an attempt times out
    async fn run_with_retry(
        &self,
        spec: &CommandSpec,
        attempts: u32,
    ) -> Result<CommandOutput, ClipboardError> {
        for attempt in 1..=attempts {
            match self.runner.run(spec).await {
                Ok(output) => return Ok(output),
                Err(ProcessError::TimedOut(timeout)) => {
                    warn!(
                        command = %spec.display(),
                        attempt,
                        attempts,
                        %timeout,
                        "clipboard command timed out"
                    );
                }
                Err(e) => return Err(spawn_failure(spec, e)),
            }
        }

        Err(ClipboardError::EngineTimeoutExpired {
            command: spec.display(),
            attempts,
            timeout: spec.timeout.to_string(),
        })
    }
}

/// Turn a finished read into clipboard text
pub fn interpret_read(
    engine: Engine,
    spec: &CommandSpec,
    output: CommandOutput,
) -> Result<String, ClipboardError> {
    if output.success() {
        return match String::from_utf8(output.stdout) {
            Ok(text) => Ok(strip_line_terminator(&text).to_string()),
            Err(_) => {
                debug!(engine = %engine, "clipboard holds non-text data");
                Ok(String::new())
            }
        };
    }

    let stderr = output.stderr_lossy();
    if engine == Engine::WlClipboard
        && output.exit_code == Some(1)
        && stderr.trim_end_matches(['\r', '\n']) == WL_NOTHING_COPIED
    {
        debug!("wl-paste reports an empty clipboard");
        return Ok(String::new());
    }

    Err(ClipboardError::Engine {
        message: format!(
            "Command \"{}\" returned non-zero exit status: {}.\n- = -\nSTDERR: {}",
            spec.display(),
            exit_status(&output),
            stderr
        ),
        exit_code: output.exit_code,
        stderr,
    })
}

/// Remove exactly one trailing line terminator
pub fn strip_line_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

fn exit_status(output: &CommandOutput) -> String {
    output
        .exit_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "terminated by signal".to_string())
}

fn spawn_failure(spec: &CommandSpec, error: ProcessError) -> ClipboardError {
    ClipboardError::engine(format!("Failed to run \"{}\": {}", spec.display(), error))
}

fn unbound(engine: Engine, backend: &Backend) -> ClipboardError {
    ClipboardError::Unknown(format!(
        "engine {} has no dispatch case for backend {:?}",
        engine, backend
    ))
}
