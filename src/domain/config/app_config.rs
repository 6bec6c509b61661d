//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::engine::Engine;
use crate::domain::policy::{EnginePolicy, DEFAULT_RETRIES, DEFAULT_X11_ENGINES};
use crate::domain::timeout::Timeout;

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinuxConfig {
    pub x11_engines: Option<Vec<String>>,
    pub kde: Option<bool>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub timeout: Option<String>,
    pub retries: Option<u32>,
    pub debug: Option<bool>,
    pub linux: Option<LinuxConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            timeout: Some(Timeout::default_timeout().to_string()),
            retries: Some(DEFAULT_RETRIES),
            debug: Some(false),
            linux: Some(LinuxConfig {
                x11_engines: Some(
                    DEFAULT_X11_ENGINES
                        .iter()
                        .map(|e| e.to_string())
                        .collect(),
                ),
                kde: Some(true),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            timeout: other.timeout.or(self.timeout),
            retries: other.retries.or(self.retries),
            debug: other.debug.or(self.debug),
            linux: Self::merge_linux_config(self.linux, other.linux),
        }
    }

    fn merge_linux_config(
        base: Option<LinuxConfig>,
        other: Option<LinuxConfig>,
    ) -> Option<LinuxConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LinuxConfig {
                x11_engines: o.x11_engines.or(b.x11_engines),
                kde: o.kde.or(b.kde),
            }),
        }
    }

    /// Get timeout as parsed Timeout, or default if not set/invalid
    pub fn timeout_or_default(&self) -> Timeout {
        self.timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn retries_or_default(&self) -> u32 {
        self.retries.unwrap_or(DEFAULT_RETRIES)
    }

    pub fn debug_or_default(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    /// X11 preference order. Falls back to the default order when unset,
    /// empty, or when any entry is not an X11 engine.
    pub fn x11_engines_or_default(&self) -> Vec<Engine> {
        let configured = self
            .linux
            .as_ref()
            .and_then(|l| l.x11_engines.as_ref())
            .map(|names| parse_x11_engines(names));

        match configured {
            Some(Some(engines)) if !engines.is_empty() => engines,
            _ => DEFAULT_X11_ENGINES.to_vec(),
        }
    }

    pub fn kde_or_default(&self) -> bool {
        self.linux.as_ref().and_then(|l| l.kde).unwrap_or(true)
    }

    /// Build the policy the resolver and dispatcher run with
    pub fn to_policy(&self) -> EnginePolicy {
        EnginePolicy::default()
            .with_timeout(self.timeout_or_default())
            .with_retries(self.retries_or_default())
            .with_x11_engines(self.x11_engines_or_default())
            .with_kde_probe(self.kde_or_default())
    }
}

/// Parse an X11 preference list, rejecting non-X11 engines
pub fn parse_x11_engines<S: AsRef<str>>(names: &[S]) -> Option<Vec<Engine>> {
    names
        .iter()
        .map(|name| match name.as_ref().parse::<Engine>() {
            Ok(engine @ (Engine::Xsel | Engine::Xclip)) => Some(engine),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.timeout, Some("7s".to_string()));
        assert_eq!(config.retries, Some(3));
        assert_eq!(config.debug, Some(false));
        let linux = config.linux.as_ref().unwrap();
        assert_eq!(
            linux.x11_engines,
            Some(vec!["xsel".to_string(), "xclip".to_string()])
        );
        assert_eq!(linux.kde, Some(true));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.timeout.is_none());
        assert!(config.retries.is_none());
        assert!(config.debug.is_none());
        assert!(config.linux.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            timeout: Some("7s".to_string()),
            retries: Some(3),
            ..Default::default()
        };
        let other = AppConfig {
            timeout: Some("2s".to_string()),
            retries: None,
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.timeout, Some("2s".to_string()));
        assert_eq!(merged.retries, Some(3));
    }

    #[test]
    fn merge_linux_config() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            linux: Some(LinuxConfig {
                x11_engines: Some(vec!["xclip".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = base.merge(other);
        assert_eq!(merged.x11_engines_or_default(), vec![Engine::Xclip]);
        assert!(merged.kde_or_default());
    }

    #[test]
    fn timeout_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            timeout: Some("soon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.timeout_or_default(), Timeout::from_secs(7));
    }

    #[test]
    fn x11_engines_rejects_non_x11_entries() {
        let config = AppConfig {
            linux: Some(LinuxConfig {
                x11_engines: Some(vec!["xclip".to_string(), "wl-clipboard".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            config.x11_engines_or_default(),
            vec![Engine::Xsel, Engine::Xclip]
        );
    }

    #[test]
    fn x11_engines_empty_list_uses_default() {
        let config = AppConfig {
            linux: Some(LinuxConfig {
                x11_engines: Some(vec![]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            config.x11_engines_or_default(),
            vec![Engine::Xsel, Engine::Xclip]
        );
    }

    #[test]
    fn to_policy_carries_values() {
        let config = AppConfig {
            timeout: Some("500ms".to_string()),
            retries: Some(1),
            linux: Some(LinuxConfig {
                x11_engines: Some(vec!["xclip".to_string(), "xsel".to_string()]),
                kde: Some(false),
            }),
            ..Default::default()
        };
        let policy = config.to_policy();
        assert_eq!(policy.timeout, Timeout::from_millis(500));
        assert_eq!(policy.retries, 1);
        assert_eq!(policy.x11_engines, vec![Engine::Xclip, Engine::Xsel]);
        assert!(!policy.kde_probe);
    }

    #[test]
    fn empty_config_policy_is_default() {
        assert_eq!(AppConfig::empty().to_policy(), EnginePolicy::default());
    }
}
