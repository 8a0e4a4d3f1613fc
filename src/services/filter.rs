//! Filter builder: raw form selections into query criteria.

use chrono::NaiveDate;

use crate::domain::models::FilterCriteria;

/// Raw filter selections as they come out of the UI form.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    /// Chosen team id.
    pub team_id: String,
    /// Lower completion-date boundary, if the user set one.
    pub completed_after: Option<NaiveDate>,
    /// Upper completion-date boundary, if the user set one.
    pub completed_before: Option<NaiveDate>,
    /// Selected status ids; may be empty.
    pub status_ids: Vec<String>,
    /// Selected assignee ids; may be empty.
    pub assignee_ids: Vec<String>,
}

/// Build [`FilterCriteria`] from raw selections.
///
/// Date boundaries are widened to whole days: an "after" date becomes
/// that day's 00:00:00 and a "before" date that day's 23:59:59, so the
/// effective window covers both boundary days entirely. Empty selection
/// sets become open filters, never match-nothing constraints.
pub fn build_criteria(selection: FilterSelection) -> FilterCriteria {
    let completed_after = selection
        .completed_after
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc());
    let completed_before = selection
        .completed_before
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|dt| dt.and_utc());

    FilterCriteria {
        team_id: selection.team_id,
        completed_after,
        completed_before,
        status_ids: (!selection.status_ids.is_empty()).then_some(selection.status_ids),
        assignee_ids: (!selection.assignee_ids.is_empty()).then_some(selection.assignee_ids),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, Timelike};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn after_boundary_starts_at_midnight() {
        let selection = FilterSelection {
            team_id: "t1".to_string(),
            completed_after: Some(date(2024, 5, 1)),
            ..FilterSelection::default()
        };
        let criteria = build_criteria(selection);
        let after = criteria.completed_after.unwrap();
        assert_eq!((after.hour(), after.minute(), after.second()), (0, 0, 0));
        assert_eq!(after.day(), 1);
    }

    #[test]
    fn before_boundary_runs_through_end_of_day() {
        let selection = FilterSelection {
            team_id: "t1".to_string(),
            completed_before: Some(date(2024, 5, 31)),
            ..FilterSelection::default()
        };
        let criteria = build_criteria(selection);
        let before = criteria.completed_before.unwrap();
        assert_eq!(
            (before.hour(), before.minute(), before.second()),
            (23, 59, 59)
        );
        assert_eq!(before.day(), 31);
    }

    #[test]
    fn full_window_covers_both_boundary_days() {
        let selection = FilterSelection {
            team_id: "t1".to_string(),
            completed_after: Some(date(2024, 5, 1)),
            completed_before: Some(date(2024, 5, 31)),
            ..FilterSelection::default()
        };
        let criteria = build_criteria(selection);
        assert!(criteria.completed_after.unwrap() < criteria.completed_before.unwrap());
    }

    #[test]
    fn empty_selection_sets_become_open_filters() {
        let selection = FilterSelection {
            team_id: "t1".to_string(),
            ..FilterSelection::default()
        };
        let criteria = build_criteria(selection);
        assert!(criteria.status_ids.is_none());
        assert!(criteria.assignee_ids.is_none());
    }

    #[test]
    fn non_empty_selections_are_kept() {
        let selection = FilterSelection {
            team_id: "t1".to_string(),
            status_ids: vec!["s1".to_string(), "s2".to_string()],
            assignee_ids: vec!["u1".to_string()],
            ..FilterSelection::default()
        };
        let criteria = build_criteria(selection);
        assert_eq!(criteria.status_ids.as_deref().unwrap().len(), 2);
        assert_eq!(criteria.assignee_ids.as_deref().unwrap().len(), 1);
    }
}
