//! Environment probe
//!
//! Reads OS identity and, on Linux-family systems, the display server and
//! desktop environment. Nothing here fails: unknown values fall through to
//! the resolver, which turns them into classified errors.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Desktop, DisplayServer, OsName};

use super::ports::Environment;

/// Session variables naming the desktop, newest convention first
pub const DESKTOP_VARS: [&str; 2] = ["XDG_CURRENT_DESKTOP", "XDG_SESSION_DESKTOP"];

/// Variables older KDE sessions export. Any one of them means KDE.
pub const KDE_LEGACY_MARKERS: [&str; 4] = [
    "KDE_FULL_SESSION",
    "KDE_SESSION_VERSION",
    "KDE_SESSION_UID",
    "KDEDIRS",
];

/// D-Bus command line clients able to reach Klipper
pub const KDE_IPC_BINARIES: [&str; 3] = ["qdbus", "qdbus6", "qdbus-qt5"];

/// What the probe saw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub os: OsName,
    pub display_server: DisplayServer,
    pub desktop: Desktop,
}

/// Probe the whole environment once
pub fn probe(env: &dyn Environment) -> ProbeReport {
    let os = detect_os(env);
    let (display_server, desktop) = if os.is_linux_family() {
        (read_display_server(env), read_desktop(env))
    } else {
        (DisplayServer::Unset, Desktop::not_set())
    };

    debug!(%os, %display_server, %desktop, "environment probed");

    ProbeReport {
        os,
        display_server,
        desktop,
    }
}

/// Detect the OS, telling Android apart from Linux and macOS apart
/// from other Darwin systems
pub fn detect_os(env: &dyn Environment) -> OsName {
    let raw = env.os_name();

    if raw == "Linux" && env.has_android_marker() {
        return OsName::Android;
    }
    if raw == "Darwin" && env.is_dir("/Users") {
        return OsName::MacOs;
    }

    OsName::from_raw(&raw)
}

pub fn check_binary_installed(env: &dyn Environment, name: &str) -> bool {
    let installed = env.binary_installed(name);
    debug!(binary = name, installed, "binary lookup");
    installed
}

/// Display server tier from `XDG_SESSION_TYPE`
pub fn read_display_server(env: &dyn Environment) -> DisplayServer {
    DisplayServer::from_env(env.var("XDG_SESSION_TYPE").as_deref())
}

/// Desktop environment, falling back through older conventions.
///
/// `XDG_CURRENT_DESKTOP`, then `XDG_SESSION_DESKTOP`, then any legacy KDE
/// marker, then the "not set" sentinel. The result is uppercased.
pub fn read_desktop(env: &dyn Environment) -> Desktop {
    let named = DESKTOP_VARS
        .iter()
        .filter_map(|name| env.var(name))
        .find(|value| !value.is_empty());

    if let Some(name) = named {
        return Desktop::new(&name);
    }

    if KDE_LEGACY_MARKERS
        .iter()
        .filter_map(|marker| env.var(marker))
        .any(|value| !value.is_empty())
    {
        return Desktop::new("KDE");
    }

    Desktop::not_set()
}

/// First installed Klipper IPC endpoint binary, if any
pub fn kde_endpoint(env: &dyn Environment) -> Option<&'static str> {
    KDE_IPC_BINARIES
        .iter()
        .copied()
        .find(|name| check_binary_installed(env, name))
}
