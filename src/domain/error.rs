//! Domain error types

use thiserror::Error;

/// Error when parsing a timeout string
#[derive(Debug, Clone, Error)]
#[error("Invalid timeout format: \"{input}\". Expected format: <number>ms, <number>s, <number>m, or <number>m<number>s (e.g., 500ms, 7s, 1m30s)")]
pub struct TimeoutParseError {
    pub input: String,
}

/// Error when an unknown engine name is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid engine: \"{input}\". Valid engines are: xsel, xclip, wl-clipboard, klipper, termux-clipboard, windows-native, macos-pboard")]
pub struct InvalidEngineError {
    pub input: String,
}

/// Clipboard library errors.
///
/// Every failure raised by detection or by `get`/`set` is one of these
/// variants, so callers can match narrowly or just propagate the enum.
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    /// The OS, display server or session type cannot have a clipboard.
    #[error("{0}")]
    Unsupported(String),

    /// The environment is supported but no working tool was found.
    #[error("{0}")]
    NoEnginesFound(String),

    /// A client library needed for an IPC engine is missing.
    #[error("{0}")]
    AdditionalDependenciesRequired(String),

    /// An engine was invoked and failed.
    #[error("{message}")]
    Engine {
        message: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Invocation kept timing out after all retries.
    #[error("The timeout for executing \"{command}\" was exceeded ({attempts} attempts, {timeout} each)")]
    EngineTimeoutExpired {
        command: String,
        attempts: u32,
        timeout: String,
    },

    #[error("Clipboard is not initialized. Call init() before get() or set()")]
    NotInitialized,

    #[error("Not specified text to paste")]
    TextNotSpecified,

    /// Internal invariant violated; report upstream.
    #[error("Unknown error: {0}. Please report this at https://github.com/NikitaBeloglazov/clipman/issues/new")]
    Unknown(String),
}

impl ClipboardError {
    /// Build an engine failure with no process details attached
    pub fn engine(message: impl Into<String>) -> Self {
        ClipboardError::Engine {
            message: message.into(),
            exit_code: None,
            stderr: String::new(),
        }
    }

    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClipboardError::EngineTimeoutExpired { .. })
    }
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_timeouts_are_retryable() {
        let timeout = ClipboardError::EngineTimeoutExpired {
            command: "xsel".to_string(),
            attempts: 4,
            timeout: "7s".to_string(),
        };
        assert!(timeout.is_retryable());
        assert!(!ClipboardError::NotInitialized.is_retryable());
        assert!(!ClipboardError::engine("boom").is_retryable());
    }

    #[test]
    fn engine_helper_has_no_details() {
        match ClipboardError::engine("failed") {
            ClipboardError::Engine {
                message,
                exit_code,
                stderr,
            } => {
                assert_eq!(message, "failed");
                assert!(exit_code.is_none());
                assert!(stderr.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn timeout_message_names_command() {
        let err = ClipboardError::EngineTimeoutExpired {
            command: "wl-paste".to_string(),
            attempts: 4,
            timeout: "7s".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("wl-paste"));
        assert!(msg.contains("4 attempts"));
    }
}
