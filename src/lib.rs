//! Issuebrief - Executive summaries for Linear issues.
//!
//! A small interactive web tool: it pulls issue data from the Linear
//! GraphQL API, filters it by team, status, assignee, and completion
//! date, and asks the Anthropic Messages API for a prose executive
//! summary presented through a form-based UI.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain Layer** (`domain`): models, errors, and the two port
//!   traits ([`domain::ports::IssueGateway`],
//!   [`domain::ports::CompletionBackend`])
//! - **Adapters** (`adapters`): the Linear GraphQL client and the
//!   Anthropic Messages client
//! - **Service Layer** (`services`): filter building, summary
//!   generation, session state
//! - **Infrastructure** (`infrastructure`): configuration and logging
//! - **Web Layer** (`web`): axum routes and askama templates

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod web;

// Re-export commonly used types for convenience
pub use adapters::{AnthropicClient, LinearClient};
pub use domain::errors::{AppError, AppResult};
pub use domain::models::{Config, FilterCriteria, Issue, Team, User};
pub use domain::ports::{CompletionBackend, CompletionRequest, IssueGateway};
pub use infrastructure::{ConfigError, ConfigLoader};
pub use services::{build_criteria, FilterSelection, SessionStore, SummaryService};
pub use web::WebServer;
