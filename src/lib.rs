//! clipman - OS-agnostic clipboard access
//!
//! Detects which clipboard engine the machine offers (xsel, xclip,
//! wl-clipboard, Klipper, termux-clipboard, the Windows native clipboard or
//! pbcopy/pbpaste), commits to it once, and routes every read and write
//! through it.
//!
//! ```no_run
//! # async fn demo() -> Result<(), clipman::ClipboardError> {
//! let session = clipman::init(false).await?;
//! session.set(Some("hello")).await?;
//! assert_eq!(session.get().await?, "hello");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Platform and engine value objects, policy, config, errors
//! - **Application**: Probe, resolver, dispatcher, session and port traits
//! - **Infrastructure**: Child processes, host environment, qdbus, arboard, XDG config
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

pub use application::{Session, SessionInfo};
pub use domain::{ClipboardError, Engine, EnginePolicy, Timeout};

/// Detect the engine with the default policy and return a ready session
pub async fn init(debug: bool) -> Result<Session, ClipboardError> {
    init_with_policy(EnginePolicy::default(), debug).await
}

/// Detect the engine with a custom policy and return a ready session
pub async fn init_with_policy(policy: EnginePolicy, debug: bool) -> Result<Session, ClipboardError> {
    let collaborators = infrastructure::system_collaborators(&policy);
    let mut session = Session::new(collaborators, policy);
    session.init(debug).await?;
    Ok(session)
}
