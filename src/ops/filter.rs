use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::filter::FilterCriteria;
use crate::model::task::{CATEGORIES, Task, TaskCategory};

/// Result of running the filter engine over the task list
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Tasks passing all predicates, in store order
    pub visible: Vec<Task>,
    /// Per-category totals over the unfiltered list
    pub per_category: BTreeMap<TaskCategory, usize>,
    /// Per-category counts with the search and time-range predicates applied
    /// but the category predicate ignored — "how many of category X would be
    /// visible if the category checkboxes were cleared"
    pub per_category_visible: BTreeMap<TaskCategory, usize>,
}

/// Apply `criteria` to `tasks`. `today` anchors the time-range predicate so
/// the engine stays deterministic under test.
pub fn apply(tasks: &[Task], criteria: &FilterCriteria, today: NaiveDate) -> FilterOutcome {
    let search_re = search_regex(&criteria.search_query);

    let mut per_category = BTreeMap::new();
    let mut per_category_visible = BTreeMap::new();
    for cat in CATEGORIES {
        per_category.insert(cat, 0);
        per_category_visible.insert(cat, 0);
    }

    let mut visible = Vec::new();
    for task in tasks {
        *per_category.entry(task.category).or_insert(0) += 1;

        let passes_search = matches_search(task, search_re.as_ref());
        let passes_time = matches_time_range(task, criteria, today);
        if passes_search && passes_time {
            *per_category_visible.entry(task.category).or_insert(0) += 1;
            if matches_category(task, criteria) {
                visible.push(task.clone());
            }
        }
    }

    FilterOutcome {
        visible,
        per_category,
        per_category_visible,
    }
}

/// Build a case-insensitive literal matcher for the query, or `None` when the
/// query is empty (no restriction)
pub fn search_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

fn matches_category(task: &Task, criteria: &FilterCriteria) -> bool {
    criteria.categories.is_empty() || criteria.categories.contains(&task.category)
}

fn matches_search(task: &Task, re: Option<&Regex>) -> bool {
    let Some(re) = re else {
        return true;
    };
    re.is_match(&task.name)
        || task
            .description
            .as_deref()
            .is_some_and(|desc| re.is_match(desc))
}

fn matches_time_range(task: &Task, criteria: &FilterCriteria, today: NaiveDate) -> bool {
    let Some(range) = criteria.time_range else {
        return true;
    };
    // Calendar-day difference; negative for tasks already started, so any
    // positive threshold only excludes far-future tasks
    let days_diff = (task.start_date - today).num_days();
    days_diff <= range.days()
}
