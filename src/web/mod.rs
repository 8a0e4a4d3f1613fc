//! Web layer: axum server, handlers, and page templates.

pub mod handlers;
pub mod server;
pub mod views;

pub use server::{AppState, WebServer};
