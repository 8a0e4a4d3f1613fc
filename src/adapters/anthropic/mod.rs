//! Anthropic completion adapter.

pub mod client;

pub use client::AnthropicClient;
