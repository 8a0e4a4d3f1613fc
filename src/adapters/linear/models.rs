//! Linear GraphQL response models.
//!
//! These structs map to the JSON shapes of the queries in
//! [`super::queries`]. They are internal to the Linear adapter and are
//! converted into domain models before leaving it.

use serde::Deserialize;

use crate::domain::models::{
    Assignee, Issue, StatusChange, StatusRef, Team, User, WorkflowState,
};

/// The `nodes`-wrapped connection shape Linear uses for every list.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    /// The items in this page of the connection.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// `data` payload of the teams query.
#[derive(Debug, Deserialize)]
pub struct TeamsData {
    /// The teams connection.
    pub teams: Connection<TeamNode>,
}

/// One team with its nested workflow states.
#[derive(Debug, Deserialize)]
pub struct TeamNode {
    /// Team identifier.
    pub id: String,
    /// Team name.
    pub name: String,
    /// Short display key.
    pub key: String,
    /// The team's workflow states.
    #[serde(default)]
    pub states: Connection<StateNode>,
}

/// One workflow state.
#[derive(Debug, Deserialize)]
pub struct StateNode {
    /// State identifier.
    pub id: String,
    /// State name.
    pub name: String,
    /// Workflow category ("completed", "started", ...).
    #[serde(rename = "type")]
    pub category: String,
}

/// `data` payload of the users query.
#[derive(Debug, Deserialize)]
pub struct UsersData {
    /// The users connection.
    pub users: Connection<UserNode>,
}

/// One user.
#[derive(Debug, Deserialize)]
pub struct UserNode {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// `data` payload of the viewer (credential probe) query.
#[derive(Debug, Deserialize)]
pub struct ViewerData {
    /// The authenticated viewer.
    pub viewer: ViewerNode,
}

/// The authenticated viewer's identity.
#[derive(Debug, Deserialize)]
pub struct ViewerNode {
    /// Viewer identifier.
    pub id: String,
}

/// `data` payload of the issues query.
#[derive(Debug, Deserialize)]
pub struct IssuesData {
    /// The issues connection.
    pub issues: Connection<IssueNode>,
}

/// One issue with its nested state, assignee, labels, and history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    /// Issue title.
    pub title: String,
    /// Human-readable identifier (e.g., "ENG-12").
    pub identifier: String,
    /// Current workflow state.
    pub state: IssueStateNode,
    /// Priority ordinal; Linear reports this as a number.
    #[serde(default)]
    pub priority: Option<f64>,
    /// ISO 8601 completion timestamp, null while open.
    #[serde(default)]
    pub completed_at: Option<String>,
    /// Issue description.
    #[serde(default)]
    pub description: Option<String>,
    /// Assigned user, if any.
    #[serde(default)]
    pub assignee: Option<AssigneeNode>,
    /// Labels applied to the issue.
    #[serde(default)]
    pub labels: Connection<LabelNode>,
    /// Most recent status transitions.
    #[serde(default)]
    pub history: Connection<HistoryNode>,
}

/// An issue's current state, by name.
#[derive(Debug, Deserialize)]
pub struct IssueStateNode {
    /// State name.
    pub name: String,
    /// Workflow category.
    #[serde(rename = "type")]
    pub category: String,
}

/// An issue's assignee.
#[derive(Debug, Deserialize)]
pub struct AssigneeNode {
    /// Display name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// A label name.
#[derive(Debug, Deserialize)]
pub struct LabelNode {
    /// The label name.
    pub name: String,
}

/// One history entry. Either end of the transition may be null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryNode {
    /// State moved from, if recorded.
    #[serde(default)]
    pub from_state: Option<NamedNode>,
    /// State moved to, if recorded.
    #[serde(default)]
    pub to_state: Option<NamedNode>,
    /// ISO 8601 timestamp of the transition.
    pub updated_at: String,
}

/// A node carrying only a name.
#[derive(Debug, Deserialize)]
pub struct NamedNode {
    /// The name.
    pub name: String,
}

impl From<TeamNode> for Team {
    fn from(node: TeamNode) -> Self {
        Self {
            id: node.id,
            key: node.key,
            name: node.name,
            states: node.states.nodes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<StateNode> for WorkflowState {
    fn from(node: StateNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            category: node.category,
        }
    }
}

impl From<UserNode> for User {
    fn from(node: UserNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            email: node.email,
        }
    }
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Self {
            identifier: node.identifier,
            title: node.title,
            description: node.description,
            priority: node.priority.unwrap_or(0.0),
            state: StatusRef {
                name: node.state.name,
                category: node.state.category,
            },
            assignee: node.assignee.map(|a| Assignee {
                name: a.name,
                email: a.email,
            }),
            completed_at: node.completed_at,
            labels: node.labels.nodes.into_iter().map(|l| l.name).collect(),
            history: node
                .history
                .nodes
                .into_iter()
                .map(|h| StatusChange {
                    from_state: h.from_state.map(|s| s.name),
                    to_state: h.to_state.map(|s| s.name),
                    updated_at: h.updated_at,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_node_converts_to_domain() {
        let json = serde_json::json!({
            "title": "Fix login bug",
            "identifier": "ENG-12",
            "state": { "name": "Done", "type": "completed" },
            "priority": 1,
            "completedAt": "2024-05-01",
            "description": "Broken OAuth flow",
            "assignee": null,
            "labels": { "nodes": [{ "name": "bug" }] },
            "history": {
                "nodes": [{
                    "fromState": { "name": "In Progress" },
                    "toState": { "name": "Done" },
                    "updatedAt": "2024-05-01"
                }]
            }
        });
        let node: IssueNode = serde_json::from_value(json).unwrap();
        let issue: Issue = node.into();
        assert_eq!(issue.identifier, "ENG-12");
        assert!(issue.assignee.is_none());
        assert_eq!(issue.labels, vec!["bug".to_string()]);
        assert_eq!(issue.history.len(), 1);
        assert_eq!(issue.history[0].from_state.as_deref(), Some("In Progress"));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let json = serde_json::json!({
            "title": "Spike",
            "identifier": "ENG-99",
            "state": { "name": "Backlog", "type": "backlog" }
        });
        let node: IssueNode = serde_json::from_value(json).unwrap();
        let issue: Issue = node.into();
        assert!(issue.completed_at.is_none());
        assert!(issue.labels.is_empty());
        assert!(issue.history.is_empty());
        assert_eq!(issue.priority, 0.0);
    }
}
