//! Domain layer: models, errors, and port interfaces.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{AppError, AppResult};
