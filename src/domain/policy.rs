//! Resolution and invocation policy

use crate::domain::engine::Engine;
use crate::domain::timeout::Timeout;

/// Extra attempts after a timed-out invocation
pub const DEFAULT_RETRIES: u32 = 3;

/// X11 engines in order of preference. xsel answers faster than xclip.
pub const DEFAULT_X11_ENGINES: [Engine; 2] = [Engine::Xsel, Engine::Xclip];

/// Knobs consumed by the resolver and the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePolicy {
    /// Bound on a single process attempt
    pub timeout: Timeout,
    /// Attempts added after a timeout before giving up
    pub retries: u32,
    /// X11 candidates, first installed one wins
    pub x11_engines: Vec<Engine>,
    /// Whether the Klipper IPC probe runs on Linux-family systems
    pub kde_probe: bool,
}

impl EnginePolicy {
    /// Total attempts a timing-out call gets
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_x11_engines(mut self, engines: Vec<Engine>) -> Self {
        self.x11_engines = engines;
        self
    }

    pub fn with_kde_probe(mut self, enabled: bool) -> Self {
        self.kde_probe = enabled;
        self
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            timeout: Timeout::default_timeout(),
            retries: DEFAULT_RETRIES,
            x11_engines: DEFAULT_X11_ENGINES.to_vec(),
            kde_probe: true,
        }
    }
}
