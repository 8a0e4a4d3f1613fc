//! GraphQL query documents and variable builders for the Linear API.
//!
//! All issue filtering goes through bind variables: the filter object is
//! passed as the `$filter` variable, never spliced into the document
//! text, so user-chosen ids and dates cannot break the query.

use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

use crate::domain::models::FilterCriteria;

/// Teams with their nested workflow states.
pub const TEAMS_QUERY: &str = "\
query Teams {
  teams {
    nodes {
      id
      name
      key
      states {
        nodes {
          id
          name
          type
        }
      }
    }
  }
}";

/// All users.
pub const USERS_QUERY: &str = "\
query Users {
  users {
    nodes {
      id
      name
      email
    }
  }
}";

/// Viewer identity, used as the credential probe.
pub const VIEWER_QUERY: &str = "query Viewer { viewer { id } }";

/// Parametrized issue listing. History is bounded to the 10 most
/// recent transitions.
pub const ISSUES_QUERY: &str = "\
query Issues($filter: IssueFilter) {
  issues(filter: $filter) {
    nodes {
      title
      identifier
      state {
        name
        type
      }
      priority
      completedAt
      description
      assignee {
        name
        email
      }
      labels {
        nodes {
          name
        }
      }
      history(first: 10) {
        nodes {
          fromState {
            name
          }
          toState {
            name
          }
          updatedAt
        }
      }
    }
  }
}";

/// Build the `$filter` variable object for [`ISSUES_QUERY`].
///
/// The team constraint is always present. Each optional dimension adds
/// one more AND-ed key; ids within a dimension go into an `in:` list
/// (OR semantics). Omitted dimensions add nothing, leaving the filter
/// open.
pub fn issue_filter(criteria: &FilterCriteria) -> Value {
    let mut filter = Map::new();
    filter.insert(
        "team".to_string(),
        json!({ "id": { "eq": criteria.team_id } }),
    );

    let mut completed = Map::new();
    if let Some(after) = criteria.completed_after {
        completed.insert(
            "gte".to_string(),
            Value::String(after.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
    }
    if let Some(before) = criteria.completed_before {
        completed.insert(
            "lte".to_string(),
            Value::String(before.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
    }
    if !completed.is_empty() {
        filter.insert("completedAt".to_string(), Value::Object(completed));
    }

    if let Some(status_ids) = &criteria.status_ids {
        filter.insert("state".to_string(), json!({ "id": { "in": status_ids } }));
    }

    if let Some(assignee_ids) = &criteria.assignee_ids {
        filter.insert(
            "assignee".to_string(),
            json!({ "id": { "in": assignee_ids } }),
        );
    }

    Value::Object(filter)
}

/// Variables payload for [`ISSUES_QUERY`].
pub fn issue_variables(criteria: &FilterCriteria) -> Value {
    json!({ "filter": issue_filter(criteria) })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn bare_criteria_produce_only_the_team_constraint() {
        let criteria = FilterCriteria::for_team("team-1");
        let filter = issue_filter(&criteria);
        let obj = filter.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(filter["team"]["id"]["eq"], "team-1");
    }

    #[test]
    fn status_ids_use_in_membership() {
        let mut criteria = FilterCriteria::for_team("team-1");
        criteria.status_ids = Some(vec!["s1".to_string(), "s2".to_string()]);
        let filter = issue_filter(&criteria);
        assert_eq!(filter["state"]["id"]["in"], json!(["s1", "s2"]));
        assert!(filter.get("assignee").is_none());
    }

    #[test]
    fn assignee_ids_use_in_membership() {
        let mut criteria = FilterCriteria::for_team("team-1");
        criteria.assignee_ids = Some(vec!["u1".to_string()]);
        let filter = issue_filter(&criteria);
        assert_eq!(filter["assignee"]["id"]["in"], json!(["u1"]));
    }

    #[test]
    fn date_bounds_serialize_as_rfc3339() {
        let mut criteria = FilterCriteria::for_team("team-1");
        criteria.completed_after = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        criteria.completed_before = Some(Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap());
        let filter = issue_filter(&criteria);
        assert_eq!(filter["completedAt"]["gte"], "2024-05-01T00:00:00Z");
        assert_eq!(filter["completedAt"]["lte"], "2024-05-31T23:59:59Z");
    }

    #[test]
    fn single_bound_omits_the_other_end() {
        let mut criteria = FilterCriteria::for_team("team-1");
        criteria.completed_before = Some(Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap());
        let filter = issue_filter(&criteria);
        let completed = filter["completedAt"].as_object().unwrap();
        assert_eq!(completed.len(), 1);
        assert!(completed.contains_key("lte"));
    }

    #[test]
    fn variables_wrap_the_filter() {
        let criteria = FilterCriteria::for_team("team-1");
        let variables = issue_variables(&criteria);
        assert_eq!(variables["filter"]["team"]["id"]["eq"], "team-1");
    }
}
