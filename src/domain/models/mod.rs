//! Domain models for the issuebrief system.

pub mod config;
pub mod filter;
pub mod issue;

pub use config::{AnthropicConfig, Config, LinearConfig, LoggingConfig, ServerConfig};
pub use filter::FilterCriteria;
pub use issue::{Assignee, Issue, StatusChange, StatusRef, Team, User, WorkflowState};
