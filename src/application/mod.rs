//! Application layer - Probe, resolution, and dispatch
//!
//! Contains the session context, the three clipboard layers, and the
//! port interfaces they depend on.

pub mod dispatcher;
pub mod ports;
pub mod probe;
pub mod resolver;
pub mod session;

#[cfg(test)]
pub(crate) mod fakes;

pub use dispatcher::{Backend, Dispatcher, Resolution};
pub use probe::{probe, ProbeReport};
pub use resolver::resolve_engine;
pub use session::{Collaborators, Session, SessionInfo};
