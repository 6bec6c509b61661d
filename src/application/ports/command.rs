//! Process execution port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Timeout;

/// A single process invocation.
///
/// The program and its arguments travel as a vector and are never joined
/// into a shell string, so clipboard text cannot inject commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub argv: Vec<String>,
    /// Bytes written to stdin, which is then closed. `None` wires stdin to null.
    pub stdin: Option<Vec<u8>>,
    /// Capture stdout/stderr; when false both go to null
    pub capture: bool,
    pub timeout: Timeout,
}

impl CommandSpec {
    pub fn new<S: AsRef<str>>(argv: &[S], timeout: Timeout) -> Self {
        Self {
            argv: argv.iter().map(|a| a.as_ref().to_string()).collect(),
            stdin: None,
            capture: true,
            timeout,
        }
    }

    pub fn with_stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn discard_output(mut self) -> Self {
        self.capture = false;
        self
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    /// Human-readable command line for messages
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }
}

/// Result of a process that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Process execution errors
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    #[error("{program} not found")]
    NotFound { program: String },

    /// The attempt exceeded its timeout; the child has been killed and reaped
    #[error("timed out after {0}")]
    TimedOut(Timeout),

    #[error("failed to run {program}: {message}")]
    Io { program: String, message: String },
}

/// Port for running external programs
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion or until its timeout.
    ///
    /// The child is always reaped before this returns, including on timeout.
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError>;
}
