//! Environment probe port

/// Read-only view of the host the clipboard runs on
pub trait Environment: Send + Sync {
    /// Raw platform name: "Linux", "Darwin", "Windows", "FreeBSD", "OpenBSD", ...
    fn os_name(&self) -> String;

    /// Whether the runtime exposes an Android-specific capability.
    /// Android reports itself as Linux, so this is the only way to tell.
    fn has_android_marker(&self) -> bool;

    /// Value of an environment variable, `None` when absent
    fn var(&self, name: &str) -> Option<String>;

    fn is_dir(&self, path: &str) -> bool;

    /// True iff an executable with this name resolves on the search path
    fn binary_installed(&self, name: &str) -> bool;
}
