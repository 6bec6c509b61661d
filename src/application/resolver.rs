//! Engine resolver
//!
//! Picks exactly one engine for the probed environment or fails with a
//! classified, actionable error. Priority per OS:
//!
//! - Linux/FreeBSD/OpenBSD: Klipper over D-Bus, then by display server
//!   (X11 follows the policy order, xsel before xclip by default; Wayland
//!   uses wl-clipboard; TTY is unsupported)
//! - Android: termux-clipboard
//! - Windows: native backend
//! - macOS: pbpaste/pbcopy

use tracing::debug;

use crate::domain::{ClipboardError, Desktop, DisplayServer, Engine, EnginePolicy, OsName};

use super::dispatcher::{Dispatcher, Resolution};
use super::ports::IpcError;
use super::probe::{check_binary_installed, kde_endpoint, ProbeReport};
use super::session::Collaborators;

const ISSUES_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues/new");

/// Resolve the engine for `report`. Called once per initialization.
pub async fn resolve_engine(
    report: &ProbeReport,
    collaborators: &Collaborators,
    policy: &EnginePolicy,
) -> Result<Resolution, ClipboardError> {
    let env = collaborators.environment.as_ref();

    match &report.os {
        os if os.is_linux_family() => resolve_linux(report, collaborators, policy).await,
        OsName::Android => {
            if !check_binary_installed(env, "termux-clipboard-get") {
                return Err(ClipboardError::NoEnginesFound(
                    "Clipboard engines not found on your system. For Android+Termux, you need to run \"pkg install termux-api\" and install the \"Termux:API\" plug-in from F-Droid.".to_string(),
                ));
            }

            let dispatcher = Dispatcher::new(collaborators.runner.as_ref(), policy);
            match dispatcher.probe_read(Engine::TermuxClipboard).await {
                Ok(_) => Ok(Resolution::process(Engine::TermuxClipboard)),
                Err(ClipboardError::EngineTimeoutExpired { .. }) => Err(ClipboardError::NoEnginesFound(
                    "No usable clipboard engines found on your system. \"termux-clipboard-get\" finished with timeout, so that means the Termux:API plug-in is not installed. Please install it from F-Droid and try again.".to_string(),
                )),
                Err(e) => Err(liveness_failure(Engine::TermuxClipboard, e)),
            }
        }
        OsName::Windows => Ok(Resolution::native(collaborators.native.clone())),
        OsName::MacOs => {
            if check_binary_installed(env, "pbpaste") {
                Ok(Resolution::process(Engine::MacosPboard))
            } else {
                Err(ClipboardError::NoEnginesFound(
                    "Clipboard engines not found on your system. \"pbpaste\" and \"pbcopy\" ship with macOS; check that /usr/bin is on your PATH.".to_string(),
                ))
            }
        }
        other => Err(ClipboardError::Unsupported(format!(
            "Clipboard engines not found on your system. Seems like \"{}\" is unsupported. Please make an issue at {}",
            other, ISSUES_URL
        ))),
    }
}

async fn resolve_linux(
    report: &ProbeReport,
    collaborators: &Collaborators,
    policy: &EnginePolicy,
) -> Result<Resolution, ClipboardError> {
    let env = collaborators.environment.as_ref();
    let dispatcher = Dispatcher::new(collaborators.runner.as_ref(), policy);

    if policy.kde_probe {
        if let Some(endpoint) = kde_endpoint(env) {
            if let Some(resolution) = try_klipper(endpoint, &report.desktop, collaborators).await? {
                return Ok(resolution);
            }
        }
    }

    match &report.display_server {
        DisplayServer::X11 => {
            let candidate = policy.x11_engines.iter().copied().find(|engine| {
                engine
                    .probe_binary()
                    .is_some_and(|binary| check_binary_installed(env, binary))
            });

            match candidate {
                Some(engine) => confirm_live(&dispatcher, engine).await,
                None => {
                    let packages = policy
                        .x11_engines
                        .iter()
                        .map(|engine| format!("\"{}\"", engine.package()))
                        .collect::<Vec<_>>()
                        .join(" or ");
                    Err(ClipboardError::NoEnginesFound(format!(
                        "Clipboard engines not found on your system. For Linux X11, you need to install {} via your system package manager.",
                        packages
                    )))
                }
            }
        }
        DisplayServer::Wayland => {
            if check_binary_installed(env, "wl-paste") {
                confirm_live(&dispatcher, Engine::WlClipboard).await
            } else {
                Err(ClipboardError::NoEnginesFound(
                    "Clipboard engines not found on your system. For Linux Wayland, you need to install \"wl-clipboard\" via your system package manager.".to_string(),
                ))
            }
        }
        DisplayServer::Tty => Err(ClipboardError::Unsupported(
            "Clipboard in TTY is unsupported.".to_string(),
        )),
        unknown => Err(ClipboardError::NoEnginesFound(format!(
            "The graphical backend (X11, Wayland) was not found on your {} OS. Check the XDG_SESSION_TYPE variable in your ENV. Also note that TTY is unsupported.\n\nXDG_SESSION_TYPE content: {}",
            report.os,
            unknown.raw()
        ))),
    }
}

/// Connect to Klipper and issue a harmless read.
///
/// `Ok(None)` means Klipper is not this session's clipboard and resolution
/// should fall through to the display server checks.
async fn try_klipper(
    endpoint: &str,
    desktop: &Desktop,
    collaborators: &Collaborators,
) -> Result<Option<Resolution>, ClipboardError> {
    debug!(endpoint, "probing Klipper over D-Bus");

    let probed = match collaborators.klipper.connect(endpoint).await {
        Ok(proxy) => proxy.get_clipboard_contents().await.map(|_| proxy),
        Err(e) => Err(e),
    };

    match probed {
        Ok(proxy) => Ok(Some(Resolution::klipper(proxy))),
        Err(IpcError::LibraryMissing(detail)) => Err(ClipboardError::AdditionalDependenciesRequired(format!(
            "The KDE clipboard is reached over D-Bus, but the D-Bus client cannot run ({}). Install the Qt D-Bus tools (\"qdbus\", usually in the qt-tools or qttools package) via your system package manager.",
            detail
        ))),
        Err(e) if desktop.is_kde() => Err(ClipboardError::Unknown(format!(
            "KDE session detected ({}) but Klipper did not answer over D-Bus: {}",
            desktop, e
        ))),
        Err(e) => {
            debug!(error = %e, %desktop, "Klipper probe failed outside KDE, continuing");
            Ok(None)
        }
    }
}

/// Run the engine's read once; a failure aborts resolution
async fn confirm_live(dispatcher: &Dispatcher<'_>, engine: Engine) -> Result<Resolution, ClipboardError> {
    debug!(%engine, "liveness check");
    match dispatcher.probe_read(engine).await {
        Ok(_) => Ok(Resolution::process(engine)),
        Err(e @ ClipboardError::EngineTimeoutExpired { .. }) => Err(e),
        Err(e) => Err(liveness_failure(engine, e)),
    }
}

fn liveness_failure(engine: Engine, cause: ClipboardError) -> ClipboardError {
    let (exit_code, stderr) = match &cause {
        ClipboardError::Engine {
            exit_code, stderr, ..
        } => (*exit_code, stderr.clone()),
        _ => (None, String::new()),
    };
    let command = engine.probe_binary().unwrap_or_default();

    ClipboardError::Engine {
        message: format!(
            "\"{}\" is installed but does not work in this session: {}",
            command, cause
        ),
        exit_code,
        stderr,
    }
}
