//! Ports (trait interfaces) between the domain and the adapters.

pub mod completion;
pub mod issue_gateway;

pub use completion::{CompletionBackend, CompletionRequest};
pub use issue_gateway::IssueGateway;
