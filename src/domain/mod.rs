//! Domain layer - Core clipboard vocabulary
//!
//! Contains value objects, engine recipes, policy, and errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod engine;
pub mod error;
pub mod platform;
pub mod policy;
pub mod timeout;

// Re-export common types
pub use config::AppConfig;
pub use engine::{Engine, Invocation};
pub use error::*;
pub use platform::{Desktop, DisplayServer, OsName, NOT_SET};
pub use policy::EnginePolicy;
pub use timeout::Timeout;
