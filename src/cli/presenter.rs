//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;

use crate::application::SessionInfo;
use crate::domain::NOT_SET;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout exactly as given
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print what the probe found and which engine was chosen
    pub fn session_info(&self, info: &SessionInfo) {
        self.key_value("os", &info.os.to_string());
        self.key_value("display_server", info.display_server.raw());
        self.key_value("desktop", info.desktop.as_str());
        self.key_value(
            "engine",
            &info
                .engine
                .map(|e| e.to_string())
                .unwrap_or_else(|| NOT_SET.to_string()),
        );
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
