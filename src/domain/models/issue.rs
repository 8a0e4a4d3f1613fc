//! Issue-tracker domain entities.
//!
//! Everything here is a read-only snapshot of what the tracker API
//! returned: the tool never mutates or caches these across requests.
//! Timestamps are kept as the API's ISO 8601 strings because the only
//! thing done with them locally is rendering them verbatim into the
//! summary prompt.

use serde::{Deserialize, Serialize};

/// A team as defined by the issue tracker, with the workflow states it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Tracker-assigned identifier.
    pub id: String,
    /// Short display key (e.g., "ENG").
    pub key: String,
    /// Human-readable team name.
    pub name: String,
    /// Workflow states defined by this team, in the order returned.
    pub states: Vec<WorkflowState>,
}

impl Team {
    /// Label shown in the team selector, `KEY - Name`.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.key, self.name)
    }
}

/// One workflow state (status) belonging to a single team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Tracker-assigned identifier.
    pub id: String,
    /// State name (e.g., "In Progress").
    pub name: String,
    /// Workflow category tag (e.g., "completed", "started").
    pub category: String,
}

/// A user known to the tracker. Global, not team-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Tracker-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// The current status of an issue, carried by name rather than id
/// because the issue listing does not return state ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRef {
    /// State name at fetch time.
    pub name: String,
    /// Workflow category tag of the state.
    pub category: String,
}

/// The user an issue is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignee {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// One recorded status transition on an issue.
///
/// Produced by the remote system, append-only, read-only here. Either
/// end may be missing (e.g., the creation event has no from-state);
/// prompt rendering skips those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    /// Name of the state the issue moved from, if recorded.
    pub from_state: Option<String>,
    /// Name of the state the issue moved to, if recorded.
    pub to_state: Option<String>,
    /// ISO 8601 timestamp of the transition.
    pub updated_at: String,
}

/// A single issue snapshot with the fields the summary needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Human-readable identifier (e.g., "ENG-12").
    pub identifier: String,
    /// Issue title.
    pub title: String,
    /// Issue description, when one exists.
    pub description: Option<String>,
    /// Priority ordinal as reported by the tracker.
    pub priority: f64,
    /// Current status.
    pub state: StatusRef,
    /// Assigned user, if any.
    pub assignee: Option<Assignee>,
    /// ISO 8601 completion timestamp; `None` while the issue is open.
    pub completed_at: Option<String>,
    /// Label names applied to the issue.
    pub labels: Vec<String>,
    /// Most recent status transitions, capped at 10 by the query.
    pub history: Vec<StatusChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_display_label() {
        let team = Team {
            id: "t1".to_string(),
            key: "ENG".to_string(),
            name: "Engineering".to_string(),
            states: vec![],
        };
        assert_eq!(team.display_label(), "ENG - Engineering");
    }
}
