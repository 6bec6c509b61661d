//! Environment adapter backed by the running process

use std::env;
use std::path::{Path, PathBuf};

use crate::application::ports::Environment;

/// Reads the real host: process environment, filesystem, search path
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the compile target to the platform names used by the probe
fn platform_name(target_os: &str) -> String {
    match target_os {
        // Android is a Linux kernel; the android marker tells them apart
        "linux" | "android" => "Linux".to_string(),
        "macos" | "ios" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        other => other.to_string(),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Candidate file names for `name` in one search directory
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut paths = vec![dir.join(name)];

    if cfg!(windows) && Path::new(name).extension().is_none() {
        let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
        paths.extend(
            exts.split(';')
                .filter(|ext| !ext.is_empty())
                .map(|ext| dir.join(format!("{}{}", name, ext))),
        );
    }

    paths
}

/// Look for an executable called `name` in each directory of `search_path`
pub fn find_in_path(name: &str, search_path: &std::ffi::OsStr) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

impl Environment for SystemEnvironment {
    fn os_name(&self) -> String {
        platform_name(env::consts::OS)
    }

    fn has_android_marker(&self) -> bool {
        env::consts::OS == "android"
            || (env::var_os("ANDROID_ROOT").is_some() && env::var_os("ANDROID_DATA").is_some())
            || env::var_os("TERMUX_VERSION").is_some()
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn binary_installed(&self, name: &str) -> bool {
        env::var_os("PATH")
            .map(|path| find_in_path(name, &path).is_some())
            .unwrap_or(false)
    }
}
