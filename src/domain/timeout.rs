//! Timeout value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::TimeoutParseError;

/// Default per-attempt timeout for engine invocations (7 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 7;

/// Value object representing the per-attempt bound on an invocation.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout {
    milliseconds: u64,
}

impl Timeout {
    /// Create a Timeout from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Timeout from seconds, saturating at `u64::MAX` milliseconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs.saturating_mul(1000),
        }
    }

    pub const fn default_timeout() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// Get timeout in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Timeout {
    type Err = TimeoutParseError;

    /// Parse a timeout string.
    /// Supported formats: "500ms", "7s", "1m", "1m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || TimeoutParseError {
            input: s.to_string(),
        };

        if let Some(ms) = input.strip_suffix("ms") {
            let ms: u64 = ms.parse().map_err(|_| err())?;
            if ms == 0 {
                return Err(err());
            }
            return Ok(Self::from_millis(ms));
        }

        let mut minutes: u64 = 0;
        let mut seconds: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;

        for ch in input.chars() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
            } else if ch == 'm' && !current_num.is_empty() {
                minutes = current_num.parse().map_err(|_| err())?;
                current_num.clear();
                found_any = true;
            } else if ch == 's' && !current_num.is_empty() {
                seconds = current_num.parse().map_err(|_| err())?;
                current_num.clear();
                found_any = true;
            } else {
                return Err(err());
            }
        }

        if !current_num.is_empty() || !found_any {
            return Err(err());
        }

        let total_ms = minutes
            .checked_mul(60)
            .and_then(|secs| secs.checked_add(seconds))
            .and_then(|secs| secs.checked_mul(1000))
            .ok_or_else(err)?;
        if total_ms == 0 {
            return Err(err());
        }

        Ok(Self::from_millis(total_ms))
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds % 1000 != 0 {
            return write!(f, "{}ms", self.milliseconds);
        }

        let total_secs = self.milliseconds / 1000;
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::default_timeout()
    }
}
