//! Adapters implementing the domain ports against the remote APIs.

pub mod anthropic;
pub mod linear;

pub use anthropic::AnthropicClient;
pub use linear::LinearClient;
