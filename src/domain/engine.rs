//! Clipboard engine tags and their invocation recipes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidEngineError;

/// A concrete clipboard backend selected during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Engine {
    /// X11: xsel
    Xsel,
    /// X11: xclip
    Xclip,
    /// Wayland: wl-paste / wl-copy
    WlClipboard,
    /// KDE/Plasma: Klipper over D-Bus
    Klipper,
    /// Android: termux-clipboard-get / termux-clipboard-set
    TermuxClipboard,
    /// Windows: native clipboard API
    WindowsNative,
    /// macOS: pbpaste / pbcopy
    MacosPboard,
}

/// How an engine is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Spawn a process with this argument vector
    Command(&'static [&'static str]),
    /// Call the Klipper IPC proxy
    Ipc,
    /// Call the native backend handle
    Native,
}

impl Engine {
    pub const ALL: [Engine; 7] = [
        Engine::Xsel,
        Engine::Xclip,
        Engine::WlClipboard,
        Engine::Klipper,
        Engine::TermuxClipboard,
        Engine::WindowsNative,
        Engine::MacosPboard,
    ];

    /// Invocation that prints the clipboard to stdout
    pub fn read(&self) -> Invocation {
        match self {
            Engine::Xsel => Invocation::Command(&["xsel", "--clipboard", "--output"]),
            Engine::Xclip => Invocation::Command(&["xclip", "-selection", "clipboard", "-o"]),
            Engine::WlClipboard => Invocation::Command(&["wl-paste"]),
            Engine::TermuxClipboard => Invocation::Command(&["termux-clipboard-get"]),
            Engine::MacosPboard => Invocation::Command(&["pbpaste"]),
            Engine::Klipper => Invocation::Ipc,
            Engine::WindowsNative => Invocation::Native,
        }
    }

    /// Invocation that takes the new clipboard text on stdin
    pub fn write(&self) -> Invocation {
        match self {
            Engine::Xsel => Invocation::Command(&["xsel", "--clipboard", "--input"]),
            Engine::Xclip => Invocation::Command(&["xclip", "-selection", "clipboard", "-i"]),
            Engine::WlClipboard => Invocation::Command(&["wl-copy"]),
            Engine::TermuxClipboard => Invocation::Command(&["termux-clipboard-set"]),
            Engine::MacosPboard => Invocation::Command(&["pbcopy"]),
            Engine::Klipper => Invocation::Ipc,
            Engine::WindowsNative => Invocation::Native,
        }
    }

    /// Binary whose presence makes this engine a candidate, if any
    pub fn probe_binary(&self) -> Option<&'static str> {
        match self {
            Engine::Xsel => Some("xsel"),
            Engine::Xclip => Some("xclip"),
            Engine::WlClipboard => Some("wl-paste"),
            Engine::TermuxClipboard => Some("termux-clipboard-get"),
            Engine::MacosPboard => Some("pbpaste"),
            Engine::Klipper | Engine::WindowsNative => None,
        }
    }

    /// Package that provides the engine's binaries
    pub fn package(&self) -> &'static str {
        match self {
            Engine::Xsel => "xsel",
            Engine::Xclip => "xclip",
            Engine::WlClipboard => "wl-clipboard",
            Engine::Klipper => "klipper",
            Engine::TermuxClipboard => "termux-api",
            Engine::WindowsNative => "windows-native",
            Engine::MacosPboard => "pbcopy/pbpaste",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Xsel => write!(f, "xsel"),
            Engine::Xclip => write!(f, "xclip"),
            Engine::WlClipboard => write!(f, "wl-clipboard"),
            Engine::Klipper => write!(f, "klipper"),
            Engine::TermuxClipboard => write!(f, "termux-clipboard"),
            Engine::WindowsNative => write!(f, "windows-native"),
            Engine::MacosPboard => write!(f, "macos-pboard"),
        }
    }
}

impl FromStr for Engine {
    type Err = InvalidEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xsel" => Ok(Engine::Xsel),
            "xclip" => Ok(Engine::Xclip),
            "wl-clipboard" | "wl-paste" => Ok(Engine::WlClipboard),
            "klipper" => Ok(Engine::Klipper),
            "termux-clipboard" => Ok(Engine::TermuxClipboard),
            "windows-native" => Ok(Engine::WindowsNative),
            "macos-pboard" => Ok(Engine::MacosPboard),
            _ => Err(InvalidEngineError {
                input: s.to_string(),
            }),
        }
    }
}
