//! Infrastructure layer: configuration and logging setup.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
