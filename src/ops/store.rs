use chrono::Local;
use indexmap::IndexMap;

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};

/// Error type for store operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task name cannot be empty")]
    EmptyName,
    #[error("start date must not be after end date")]
    InvalidRange,
}

/// Owner of the canonical task collection.
///
/// In-memory only: the collection lives for the process lifetime and is gone
/// on exit. All operations are synchronous and total; iteration order is
/// creation order.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: IndexMap<TaskId, Task>,
    next_id: TaskId,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Validate and append a new task, assigning its id and `created_at`
    pub fn create(&mut self, draft: TaskDraft) -> Result<&Task, StoreError> {
        if draft.name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        if draft.start_date > draft.end_date {
            return Err(StoreError::InvalidRange);
        }

        let id = self.next_id;
        self.next_id += 1;

        let task = Task {
            id,
            name: draft.name,
            category: draft.category,
            start_date: draft.start_date,
            end_date: draft.end_date,
            description: draft.description,
            created_at: Local::now(),
            updated_at: None,
        };
        Ok(self.tasks.entry(id).or_insert(task))
    }

    /// Merge `patch` into the task, bumping `updated_at`. The merged result
    /// is validated the same way as a draft, so a patch can never leave an
    /// empty name or an inverted range behind.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<&Task, StoreError> {
        let task = self.tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        let name = patch.name.as_deref().unwrap_or(&task.name);
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        let start = patch.start_date.unwrap_or(task.start_date);
        let end = patch.end_date.unwrap_or(task.end_date);
        if start > end {
            return Err(StoreError::InvalidRange);
        }

        if let Some(name) = patch.name {
            task.name = name;
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        task.start_date = start;
        task.end_date = end;
        if let Some(description) = patch.description {
            task.description = description;
        }
        task.updated_at = Some(Local::now());
        Ok(task)
    }

    /// Remove a task; returns whether it was present
    pub fn delete(&mut self, id: TaskId) -> bool {
        self.tasks.shift_remove(&id).is_some()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Tasks in creation order
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskCategory;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str) -> TaskDraft {
        TaskDraft {
            name: name.into(),
            category: TaskCategory::Todo,
            start_date: date(2024, 6, 3),
            end_date: date(2024, 6, 5),
            description: None,
        }
    }

    #[test]
    fn test_create_assigns_ids_in_order() {
        let mut store = TaskStore::new();
        let a = store.create(draft("first")).unwrap().id;
        let b = store.create(draft("second")).unwrap().id;
        assert_eq!((a, b), (1, 2));

        let names: Vec<String> = store.iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let mut store = TaskStore::new();
        assert_eq!(store.create(draft("   ")), Err(StoreError::EmptyName));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_inverted_range() {
        let mut store = TaskStore::new();
        let mut d = draft("backwards");
        d.start_date = date(2024, 6, 9);
        assert_eq!(store.create(d), Err(StoreError::InvalidRange));
    }

    #[test]
    fn test_update_merges_patch_and_sets_updated_at() {
        let mut store = TaskStore::new();
        let id = store.create(draft("task")).unwrap().id;

        let patch = TaskPatch {
            category: Some(TaskCategory::Review),
            ..Default::default()
        };
        let task = store.update(id, patch).unwrap();
        assert_eq!(task.category, TaskCategory::Review);
        assert_eq!(task.name, "task");
        assert!(task.updated_at.is_some());
    }

    #[test]
    fn test_update_dates_patch() {
        let mut store = TaskStore::new();
        let id = store.create(draft("task")).unwrap().id;

        let task = store
            .update(id, TaskPatch::dates(date(2024, 6, 8), date(2024, 6, 12)))
            .unwrap();
        assert_eq!(task.start_date, date(2024, 6, 8));
        assert_eq!(task.end_date, date(2024, 6, 12));
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.update(42, TaskPatch::default()),
            Err(StoreError::NotFound(42))
        );
    }

    #[test]
    fn test_update_rejects_merged_inversion() {
        let mut store = TaskStore::new();
        let id = store.create(draft("task")).unwrap().id;

        // Patching only the start past the existing end must fail
        let patch = TaskPatch {
            start_date: Some(date(2024, 6, 9)),
            ..Default::default()
        };
        assert_eq!(store.update(id, patch), Err(StoreError::InvalidRange));
        // And the task is untouched
        assert_eq!(store.get(id).unwrap().start_date, date(2024, 6, 3));
    }

    #[test]
    fn test_update_can_clear_description() {
        let mut store = TaskStore::new();
        let mut d = draft("task");
        d.description = Some("details".into());
        let id = store.create(d).unwrap().id;

        let patch = TaskPatch {
            description: Some(None),
            ..Default::default()
        };
        assert_eq!(store.update(id, patch).unwrap().description, None);
    }

    #[test]
    fn test_delete_returns_presence() {
        let mut store = TaskStore::new();
        let id = store.create(draft("task")).unwrap().id;
        assert!(store.delete(id));
        assert!(!store.delete(id));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = TaskStore::new();
        let a = store.create(draft("a")).unwrap().id;
        store.delete(a);
        let b = store.create(draft("b")).unwrap().id;
        assert!(b > a);
    }
}
