//! Platform identity value objects

use std::fmt;

use serde::{Serialize, Serializer};

/// Sentinel recorded when a session variable is absent
pub const NOT_SET: &str = "< NOT SET >";

/// Operating system family as seen by the clipboard layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsName {
    Linux,
    FreeBsd,
    OpenBsd,
    Android,
    MacOs,
    Windows,
    /// Anything else, carrying the raw reported name
    Other(String),
}

impl OsName {
    /// Map a raw platform name to an OS. Unknown names are kept verbatim.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Linux" => OsName::Linux,
            "FreeBSD" => OsName::FreeBsd,
            "OpenBSD" => OsName::OpenBsd,
            "Android" => OsName::Android,
            "macOS" => OsName::MacOs,
            "Windows" => OsName::Windows,
            other => OsName::Other(other.to_string()),
        }
    }

    /// Linux-family systems read display server and desktop from the environment
    pub fn is_linux_family(&self) -> bool {
        matches!(self, OsName::Linux | OsName::FreeBsd | OsName::OpenBsd)
    }
}

impl fmt::Display for OsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsName::Linux => write!(f, "Linux"),
            OsName::FreeBsd => write!(f, "FreeBSD"),
            OsName::OpenBsd => write!(f, "OpenBSD"),
            OsName::Android => write!(f, "Android"),
            OsName::MacOs => write!(f, "macOS"),
            OsName::Windows => write!(f, "Windows"),
            OsName::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// Both serialize as their display form, e.g. "macOS" and "x11"
impl Serialize for OsName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Graphical session protocol, from `XDG_SESSION_TYPE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayServer {
    X11,
    Wayland,
    Tty,
    Unset,
    /// Set, but to something we do not recognize
    Unknown(String),
}

impl DisplayServer {
    pub fn from_env(value: Option<&str>) -> Self {
        match value {
            None => DisplayServer::Unset,
            Some("x11") => DisplayServer::X11,
            Some("wayland") => DisplayServer::Wayland,
            Some("tty") => DisplayServer::Tty,
            Some(other) => DisplayServer::Unknown(other.to_string()),
        }
    }

    /// Raw variable content, with the sentinel when absent
    pub fn raw(&self) -> &str {
        match self {
            DisplayServer::X11 => "x11",
            DisplayServer::Wayland => "wayland",
            DisplayServer::Tty => "tty",
            DisplayServer::Unset => NOT_SET,
            DisplayServer::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl Serialize for DisplayServer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.raw())
    }
}

/// Desktop environment, stored uppercased
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Desktop(String);

impl Desktop {
    pub fn new(name: &str) -> Self {
        Self(name.to_uppercase())
    }

    pub fn not_set() -> Self {
        Self(NOT_SET.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// KDE or Plasma session, where a dead Klipper bus is a real failure
    pub fn is_kde(&self) -> bool {
        self.0.contains("KDE") || self.0.contains("PLASMA")
    }
}

impl fmt::Display for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
