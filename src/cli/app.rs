//! Command runners for get, set and engine

use std::env;
use std::io::IsTerminal;
use std::process::ExitCode;

use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::application::{Session, SessionInfo};
use crate::domain::config::AppConfig;
use crate::domain::{ClipboardError, EnginePolicy, Timeout};
use crate::infrastructure::{system_collaborators, XdgConfigStore};

use super::args::{Commands, ConfigAction};
use super::config_cmd::{handle_config_command, parse_bool};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

pub const ENV_TIMEOUT: &str = "CLIPMAN_TIMEOUT";
pub const ENV_DEBUG: &str = "CLIPMAN_DEBUG";

/// Install the stderr log subscriber. `RUST_LOG` wins over `debug`.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Config layer built from `CLIPMAN_*` variables
pub fn env_config(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let non_empty = |name: &str| lookup(name).filter(|s| !s.is_empty());

    AppConfig {
        timeout: non_empty(ENV_TIMEOUT),
        debug: non_empty(ENV_DEBUG).and_then(|v| parse_bool(&v).ok()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        Presenter::new().warn(&format!("Ignoring {}: {}", store.path().display(), e));
        AppConfig::empty()
    });

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config(|name| env::var(name).ok()))
        .merge(cli_config)
}

/// Build the engine policy, rejecting a malformed timeout instead of
/// silently falling back to the default
pub fn policy_from(config: &AppConfig) -> Result<EnginePolicy, String> {
    if let Some(raw) = config.timeout.as_deref() {
        raw.parse::<Timeout>()
            .map_err(|e| format!("Invalid timeout: {}", e))?;
    }
    Ok(config.to_policy())
}

/// Exit code for a clipboard failure
pub fn exit_code_for(error: &ClipboardError) -> u8 {
    match error {
        ClipboardError::TextNotSpecified => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Run one parsed subcommand with the merged configuration
pub async fn run(command: Commands, config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    match command {
        Commands::Config { action } => run_config(action, &presenter).await,
        clipboard => run_clipboard(clipboard, config, &presenter).await,
    }
}

async fn run_config(action: ConfigAction, presenter: &Presenter) -> ExitCode {
    let store = XdgConfigStore::new();
    match handle_config_command(action, &store, presenter).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run_clipboard(command: Commands, config: &AppConfig, presenter: &Presenter) -> ExitCode {
    let policy = match policy_from(config) {
        Ok(policy) => policy,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let debug = config.debug_or_default();

    let result = match command {
        Commands::Get => run_get(policy, debug, presenter).await,
        Commands::Set { text } => run_set(policy, debug, text).await,
        Commands::Engine { json } => return run_engine(policy, debug, json, presenter).await,
        Commands::Config { action } => return run_config(action, presenter).await,
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn open_session(policy: EnginePolicy, debug: bool) -> Result<Session, ClipboardError> {
    let mut session = Session::new(system_collaborators(&policy), policy);
    session.init(debug).await?;
    Ok(session)
}

async fn run_get(
    policy: EnginePolicy,
    debug: bool,
    presenter: &Presenter,
) -> Result<(), ClipboardError> {
    let session = open_session(policy, debug).await?;
    let text = session.get().await?;
    presenter.output_inline(&text);
    Ok(())
}

async fn run_set(
    policy: EnginePolicy,
    debug: bool,
    text: Option<String>,
) -> Result<(), ClipboardError> {
    let text = match text {
        Some(text) => Some(text),
        None => read_piped_stdin().await?,
    };

    let session = open_session(policy, debug).await?;
    session.set(text.as_deref()).await
}

/// All of stdin when it is piped, `None` when it is a terminal
async fn read_piped_stdin() -> Result<Option<String>, ClipboardError> {
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buf = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut buf)
        .await
        .map_err(|e| ClipboardError::engine(format!("Failed to read stdin: {}", e)))?;

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

#[derive(Serialize)]
struct EngineReport {
    #[serde(flatten)]
    info: SessionInfo,
    error: Option<String>,
}

async fn run_engine(
    policy: EnginePolicy,
    debug: bool,
    json: bool,
    presenter: &Presenter,
) -> ExitCode {
    let mut session = Session::new(system_collaborators(&policy), policy);
    let outcome = session.init(debug).await;

    let report = EngineReport {
        info: session.info(),
        error: outcome.as_ref().err().map(|e| e.to_string()),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => presenter.output(&text),
            Err(e) => {
                presenter.error(&format!("Failed to encode report: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        presenter.session_info(&report.info);
        if let Some(ref error) = report.error {
            presenter.error(error);
        }
    }

    match outcome {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => ExitCode::from(exit_code_for(&e)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn env_config_reads_overrides() {
        let config = env_config(lookup(&[(ENV_TIMEOUT, "2s"), (ENV_DEBUG, "yes")]));
        assert_eq!(config.timeout, Some("2s".to_string()));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn env_config_ignores_empty_and_invalid() {
        let config = env_config(lookup(&[(ENV_TIMEOUT, ""), (ENV_DEBUG, "maybe")]));
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn env_layer_sits_between_file_and_cli() {
        let file = AppConfig {
            timeout: Some("1s".to_string()),
            ..Default::default()
        };
        let cli = AppConfig {
            timeout: Some("3s".to_string()),
            ..Default::default()
        };
        let env = env_config(lookup(&[(ENV_TIMEOUT, "2s")]));

        let without_cli = AppConfig::defaults().merge(file.clone()).merge(env.clone());
        assert_eq!(without_cli.timeout, Some("2s".to_string()));

        let with_cli = AppConfig::defaults().merge(file).merge(env).merge(cli);
        assert_eq!(with_cli.timeout, Some("3s".to_string()));
    }

    #[test]
    fn malformed_timeout_is_usage_error() {
        let config = AppConfig {
            timeout: Some("forever".to_string()),
            ..AppConfig::defaults()
        };
        let err = policy_from(&config).unwrap_err();
        assert!(err.contains("forever"));
    }

    #[test]
    fn policy_carries_config_values() {
        let config = AppConfig {
            timeout: Some("250ms".to_string()),
            retries: Some(0),
            ..AppConfig::defaults()
        };
        let policy = policy_from(&config).unwrap();
        assert_eq!(policy.timeout, Timeout::from_millis(250));
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code_for(&ClipboardError::TextNotSpecified), EXIT_USAGE_ERROR);
        assert_eq!(
            exit_code_for(&ClipboardError::Unsupported("tty".to_string())),
            EXIT_ERROR
        );
    }
}
