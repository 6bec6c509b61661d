//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// clipman - clipboard access through whatever engine this machine has
#[derive(Parser, Debug)]
#[command(name = "clipman")]
#[command(version)]
#[command(about = "Read and write the system clipboard using the engine available on this machine")]
#[command(long_about = None)]
pub struct Cli {
    /// Log engine detection and dispatch to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Per-attempt timeout for clipboard tools (e.g., 500ms, 7s, 1m)
    #[arg(short = 't', long, value_name = "TIME", global = true)]
    pub timeout: Option<String>,

    /// Extra attempts after a timed out invocation
    #[arg(short = 'r', long, value_name = "N", global = true)]
    pub retries: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the clipboard text
    #[command(visible_alias = "paste")]
    Get,
    /// Put text on the clipboard (reads stdin when TEXT is omitted)
    #[command(visible_alias = "copy")]
    Set {
        /// Text to copy
        text: Option<String>,
    },
    /// Show the detected platform and the engine that would be used
    Engine {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "timeout",
    "retries",
    "debug",
    "linux.x11_engines",
    "linux.kde",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
