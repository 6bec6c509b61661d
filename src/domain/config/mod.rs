//! Configuration value objects

mod app_config;

pub use app_config::{parse_x11_engines, AppConfig, LinuxConfig};
