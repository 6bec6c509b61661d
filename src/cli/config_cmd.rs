//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{parse_x11_engines, AppConfig, LinuxConfig};
use crate::domain::error::ConfigError;
use crate::domain::Timeout;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

/// Validate `value` for `key` and write it into `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "timeout" => {
            let timeout = value
                .parse::<Timeout>()
                .map_err(|e| invalid(e.to_string()))?;
            config.timeout = Some(timeout.to_string());
        }
        "retries" => {
            let retries = value
                .parse::<u32>()
                .map_err(|_| invalid("Value must be a non-negative integer".to_string()))?;
            config.retries = Some(retries);
        }
        "debug" => {
            config.debug = Some(parse_bool(value).map_err(|_| invalid(bool_message()))?);
        }
        "linux.x11_engines" => {
            let names = split_list(value);
            if names.is_empty() || parse_x11_engines(&names).is_none() {
                return Err(invalid(format!(
                    "Invalid value '{}'. Use a comma-separated list of: xsel, xclip",
                    value
                )));
            }
            linux_mut(config).x11_engines = Some(names);
        }
        "linux.kde" => {
            linux_mut(config).kde = Some(parse_bool(value).map_err(|_| invalid(bool_message()))?);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

fn linux_mut(config: &mut AppConfig) -> &mut LinuxConfig {
    config.linux.get_or_insert_with(LinuxConfig::default)
}

fn bool_message() -> String {
    "Value must be 'true' or 'false'".to_string()
}

/// Split "xclip, xsel" into trimmed, lowercase names
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Display form of a config value, `None` when unset
fn value_of(config: &AppConfig, key: &str) -> Option<String> {
    let linux = config.linux.as_ref();
    match key {
        "timeout" => config.timeout.clone(),
        "retries" => config.retries.map(|r| r.to_string()),
        "debug" => config.debug.map(|b| b.to_string()),
        "linux.x11_engines" => linux
            .and_then(|l| l.x11_engines.as_ref())
            .map(|engines| engines.join(",")),
        "linux.kde" => linux.and_then(|l| l.kde).map(|b| b.to_string()),
        _ => None,
    }
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(value_of(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    if !store.exists() {
        presenter.info(&format!(
            "No config file at {}, run `clipman config init` to create one",
            store.path().display()
        ));
    }
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, value_of(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Parse a boolean value
pub(crate) fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("YES"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn timeout_is_normalized() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "timeout", "90s").unwrap();
        assert_eq!(config.timeout, Some("1m30s".to_string()));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut config = AppConfig::empty();
        let err = apply_value(&mut config, "timeout", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref key, .. } if key == "timeout"));
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn retries_must_be_non_negative() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "retries", "0").unwrap();
        assert_eq!(config.retries, Some(0));
        assert!(apply_value(&mut config, "retries", "-1").is_err());
    }

    #[test]
    fn x11_engines_accepts_list() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "linux.x11_engines", "xclip, XSEL").unwrap();
        assert_eq!(
            value_of(&config, "linux.x11_engines"),
            Some("xclip,xsel".to_string())
        );
    }

    #[test]
    fn x11_engines_rejects_non_x11_engine() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "linux.x11_engines", "xsel,wl-clipboard").is_err());
        assert!(apply_value(&mut config, "linux.x11_engines", " , ").is_err());
    }

    #[test]
    fn kde_flag_creates_linux_table() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "linux.kde", "false").unwrap();
        assert_eq!(config.linux.unwrap().kde, Some(false));
    }

    #[test]
    fn unset_values_are_none() {
        let config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            assert_eq!(value_of(&config, key), None);
        }
    }

    #[test]
    fn unknown_key_fails_check() {
        assert!(check_key("api_key").is_err());
        assert!(check_key("timeout").is_ok());
    }
}
