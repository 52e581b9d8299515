use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Stable task identity, assigned by the store at creation
pub type TaskId = u64;

/// Workflow category of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Review")]
    Review,
    #[serde(rename = "Completed")]
    Completed,
}

/// All categories in display order
pub const CATEGORIES: [TaskCategory; 4] = [
    TaskCategory::Todo,
    TaskCategory::InProgress,
    TaskCategory::Review,
    TaskCategory::Completed,
];

impl TaskCategory {
    /// Human-readable label (also the serialized spelling)
    pub fn label(self) -> &'static str {
        match self {
            TaskCategory::Todo => "To Do",
            TaskCategory::InProgress => "In Progress",
            TaskCategory::Review => "Review",
            TaskCategory::Completed => "Completed",
        }
    }

    /// Parse a label back into a category. The set is closed: anything
    /// unrecognized is rejected at the boundary.
    pub fn from_label(label: &str) -> Option<TaskCategory> {
        match label {
            "To Do" => Some(TaskCategory::Todo),
            "In Progress" => Some(TaskCategory::InProgress),
            "Review" => Some(TaskCategory::Review),
            "Completed" => Some(TaskCategory::Completed),
            _ => None,
        }
    }

    /// The next category in display order, wrapping around
    pub fn next(self) -> TaskCategory {
        match self {
            TaskCategory::Todo => TaskCategory::InProgress,
            TaskCategory::InProgress => TaskCategory::Review,
            TaskCategory::Review => TaskCategory::Completed,
            TaskCategory::Completed => TaskCategory::Todo,
        }
    }

    /// The previous category in display order, wrapping around
    pub fn prev(self) -> TaskCategory {
        match self {
            TaskCategory::Todo => TaskCategory::Completed,
            TaskCategory::InProgress => TaskCategory::Todo,
            TaskCategory::Review => TaskCategory::InProgress,
            TaskCategory::Completed => TaskCategory::Review,
        }
    }
}

/// A scheduled task occupying an inclusive range of calendar days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Non-empty display name
    pub name: String,
    pub category: TaskCategory,
    /// First day the task occupies
    pub start_date: NaiveDate,
    /// Last day the task occupies (inclusive; `start_date <= end_date`)
    pub end_date: NaiveDate,
    pub description: Option<String>,
    /// Set once at creation
    pub created_at: DateTime<Local>,
    /// Set on every mutation
    pub updated_at: Option<DateTime<Local>>,
}

impl Task {
    /// Number of days the task spans, inclusive of both endpoints
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether the task occupies the given day
    pub fn occupies(&self, day: NaiveDate) -> bool {
        day >= self.start_date && day <= self.end_date
    }

    /// Whether the task spans more than one day (only multi-day bars expose
    /// resize edges)
    pub fn is_multi_day(&self) -> bool {
        self.start_date != self.end_date
    }
}

/// Input to `TaskStore::create` — everything but the store-assigned fields
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub name: String,
    pub category: TaskCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
}

/// Partial update for `TaskStore::update`; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub category: Option<TaskCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
}

impl TaskPatch {
    /// Patch that reschedules a task to a new date range (what a completed
    /// drag commits)
    pub fn dates(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        TaskPatch {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_label_round_trip() {
        for cat in CATEGORIES {
            assert_eq!(TaskCategory::from_label(cat.label()), Some(cat));
        }
        assert_eq!(TaskCategory::from_label("Blocked"), None);
    }

    #[test]
    fn test_category_next_cycles() {
        let mut cat = TaskCategory::Todo;
        for _ in 0..4 {
            cat = cat.next();
        }
        assert_eq!(cat, TaskCategory::Todo);
    }

    #[test]
    fn test_category_prev_inverts_next() {
        for cat in CATEGORIES {
            assert_eq!(cat.next().prev(), cat);
        }
    }

    #[test]
    fn test_duration_days_inclusive() {
        let task = Task {
            id: 1,
            name: "Report draft".into(),
            category: TaskCategory::Todo,
            start_date: date(2024, 6, 3),
            end_date: date(2024, 6, 7),
            description: None,
            created_at: Local::now(),
            updated_at: None,
        };
        assert_eq!(task.duration_days(), 5);
        assert!(task.is_multi_day());
        assert!(task.occupies(date(2024, 6, 5)));
        assert!(!task.occupies(date(2024, 6, 8)));
    }

    #[test]
    fn test_single_day_duration() {
        let task = Task {
            id: 2,
            name: "Standup".into(),
            category: TaskCategory::InProgress,
            start_date: date(2024, 6, 3),
            end_date: date(2024, 6, 3),
            description: None,
            created_at: Local::now(),
            updated_at: None,
        };
        assert_eq!(task.duration_days(), 1);
        assert!(!task.is_multi_day());
    }
}
