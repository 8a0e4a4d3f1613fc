//! Filter criteria for issue queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Constraints narrowing which issues are fetched.
///
/// Constructed fresh per query and never persisted. `None` in any
/// optional dimension means "no restriction", not "match nothing";
/// empty selection sets are normalized to `None` by the filter builder
/// before a criteria value is ever built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Team whose issues are queried. Always required.
    pub team_id: String,
    /// Inclusive lower bound on completion time (start of the chosen day).
    pub completed_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on completion time (end of the chosen day).
    pub completed_before: Option<DateTime<Utc>>,
    /// Status ids the issue state must be one of (OR within the set).
    pub status_ids: Option<Vec<String>>,
    /// Assignee ids the issue assignee must be one of (OR within the set).
    pub assignee_ids: Option<Vec<String>>,
}

impl FilterCriteria {
    /// Criteria matching every issue of a team, with all optional
    /// dimensions open.
    pub fn for_team(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            completed_after: None,
            completed_before: None,
            status_ids: None,
            assignee_ids: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_team_leaves_optional_dimensions_open() {
        let criteria = FilterCriteria::for_team("team-1");
        assert_eq!(criteria.team_id, "team-1");
        assert!(criteria.completed_after.is_none());
        assert!(criteria.completed_before.is_none());
        assert!(criteria.status_ids.is_none());
        assert!(criteria.assignee_ids.is_none());
    }
}
