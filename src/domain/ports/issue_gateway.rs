//! Issue gateway port - interface to the issue-tracker API.

use async_trait::async_trait;

use crate::domain::errors::AppResult;
use crate::domain::models::{FilterCriteria, Issue, Team, User};

/// Read-only access to the remote issue tracker.
///
/// Each method performs exactly one network call: there is no retry,
/// backoff, or caching behind this interface, so a single remote
/// failure is fatal to the current operation.
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// List all teams with their nested workflow states.
    async fn list_teams(&self) -> AppResult<Vec<Team>>;

    /// List all users.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Fetch the issues matching the conjunction of all criteria present.
    ///
    /// The team constraint is always applied; date range, status-set
    /// membership, and assignee-set membership are each added only when
    /// present. Errors raised by the remote call carry the attempted
    /// query text.
    async fn query_issues(&self, criteria: &FilterCriteria) -> AppResult<Vec<Issue>>;

    /// Minimal probe call verifying the configured credentials.
    async fn verify_credentials(&self) -> AppResult<()>;
}
