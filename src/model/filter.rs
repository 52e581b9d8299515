use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::task::TaskCategory;

/// How far ahead a task may start and still be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "2weeks")]
    TwoWeeks,
    #[serde(rename = "3weeks")]
    ThreeWeeks,
}

impl TimeRange {
    /// Threshold in calendar days from today
    pub fn days(self) -> i64 {
        match self {
            TimeRange::OneWeek => 7,
            TimeRange::TwoWeeks => 14,
            TimeRange::ThreeWeeks => 21,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneWeek => "within 1 week",
            TimeRange::TwoWeeks => "within 2 weeks",
            TimeRange::ThreeWeeks => "within 3 weeks",
        }
    }

    /// Cycle: none → 1 week → 2 weeks → 3 weeks → none
    pub fn cycle(current: Option<TimeRange>) -> Option<TimeRange> {
        match current {
            None => Some(TimeRange::OneWeek),
            Some(TimeRange::OneWeek) => Some(TimeRange::TwoWeeks),
            Some(TimeRange::TwoWeeks) => Some(TimeRange::ThreeWeeks),
            Some(TimeRange::ThreeWeeks) => None,
        }
    }
}

/// Filter criteria applied to the task list.
///
/// Passed to the filter engine as an immutable value; the three fields are
/// independent predicates ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Categories to show; empty means no restriction
    pub categories: BTreeSet<TaskCategory>,
    /// Restrict to tasks starting within N days of today
    pub time_range: Option<TimeRange>,
    /// Case-insensitive substring match on name or description
    pub search_query: String,
}

impl FilterCriteria {
    /// Whether any predicate is restricting the view
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty() || self.time_range.is_some() || !self.search_query.is_empty()
    }

    /// Number of active filter groups (for the "N active" badge)
    pub fn active_count(&self) -> usize {
        usize::from(!self.categories.is_empty())
            + usize::from(self.time_range.is_some())
            + usize::from(!self.search_query.is_empty())
    }

    pub fn toggle_category(&mut self, category: TaskCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.time_range = None;
        self.search_query.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_cycle() {
        let mut range = None;
        range = TimeRange::cycle(range);
        assert_eq!(range, Some(TimeRange::OneWeek));
        range = TimeRange::cycle(range);
        assert_eq!(range, Some(TimeRange::TwoWeeks));
        range = TimeRange::cycle(range);
        assert_eq!(range, Some(TimeRange::ThreeWeeks));
        range = TimeRange::cycle(range);
        assert_eq!(range, None);
    }

    #[test]
    fn test_active_count() {
        let mut criteria = FilterCriteria::default();
        assert!(!criteria.is_active());
        assert_eq!(criteria.active_count(), 0);

        criteria.toggle_category(TaskCategory::Review);
        criteria.search_query = "report".into();
        assert_eq!(criteria.active_count(), 2);

        criteria.time_range = Some(TimeRange::OneWeek);
        assert_eq!(criteria.active_count(), 3);

        criteria.clear();
        assert_eq!(criteria.active_count(), 0);
    }

    #[test]
    fn test_toggle_category_round_trip() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_category(TaskCategory::Todo);
        assert!(criteria.categories.contains(&TaskCategory::Todo));
        criteria.toggle_category(TaskCategory::Todo);
        assert!(criteria.categories.is_empty());
    }
}
