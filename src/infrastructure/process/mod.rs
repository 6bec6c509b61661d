//! Process execution adapters

mod tokio_runner;

pub use tokio_runner::TokioCommandRunner;
