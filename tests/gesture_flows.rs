//! End-to-end flows through the public API: a gesture runs against the
//! state machine and its outcome is applied to the store, the way the TUI
//! event loop does it.

use chrono::{NaiveDate, Weekday};
use pretty_assertions::assert_eq;

use dayplan::model::task::{TaskCategory, TaskDraft, TaskPatch};
use dayplan::ops::gesture::{GestureMachine, GestureOutcome, GrabRegion};
use dayplan::ops::grid::month_grid;
use dayplan::ops::store::TaskStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_store() -> TaskStore {
    let mut store = TaskStore::new();
    store
        .create(TaskDraft {
            name: "Quarterly report".into(),
            category: TaskCategory::Todo,
            start_date: date(2024, 6, 10),
            end_date: date(2024, 6, 14),
            description: None,
        })
        .unwrap();
    store
}

#[test]
fn june_2024_grid_spans_six_whole_weeks_from_sunday() {
    let days = month_grid(date(2024, 6, 15), Weekday::Sun);
    assert_eq!(days.len(), 42);
    assert_eq!(days[0], date(2024, 5, 26));
    assert_eq!(days[41], date(2024, 7, 6));
}

#[test]
fn range_drag_then_create_adds_the_task() {
    let mut store = TaskStore::new();
    let mut gesture = GestureMachine::new();

    gesture.press_cell(date(2024, 6, 5));
    gesture.pointer_move(date(2024, 6, 4));
    gesture.pointer_move(date(2024, 6, 8));
    let outcome = gesture.release().unwrap();
    assert_eq!(
        outcome,
        GestureOutcome::RangeSelected {
            start: date(2024, 6, 5),
            end: date(2024, 6, 8),
        }
    );

    let GestureOutcome::RangeSelected { start, end } = outcome else {
        unreachable!();
    };
    let task = store
        .create(TaskDraft {
            name: "New thing".into(),
            category: TaskCategory::Todo,
            start_date: start,
            end_date: end,
            description: None,
        })
        .unwrap();
    assert_eq!((task.start_date, task.end_date), (start, end));
    assert!(!gesture.is_active());
}

#[test]
fn body_drag_moves_the_task_preserving_duration_and_grab_offset() {
    let mut store = seeded_store();
    let mut gesture = GestureMachine::new();

    // Grab the middle of the bar, two days into it
    let task = store.get(1).cloned().unwrap();
    gesture.press_task(&task, date(2024, 6, 12), GrabRegion::Body);
    gesture.pointer_move(date(2024, 6, 19));
    let outcome = gesture.release().unwrap();
    assert_eq!(
        outcome,
        GestureOutcome::TaskDragged {
            id: 1,
            start_date: date(2024, 6, 17),
            end_date: date(2024, 6, 21),
        }
    );

    let GestureOutcome::TaskDragged {
        id,
        start_date,
        end_date,
    } = outcome
    else {
        unreachable!();
    };
    store.update(id, TaskPatch::dates(start_date, end_date)).unwrap();
    let task = store.get(1).unwrap();
    assert_eq!(task.start_date, date(2024, 6, 17));
    assert_eq!(task.end_date, date(2024, 6, 21));
    assert_eq!(task.duration_days(), 5);
}

#[test]
fn end_resize_extends_and_never_inverts() {
    let mut store = seeded_store();
    let mut gesture = GestureMachine::new();

    let task = store.get(1).cloned().unwrap();
    gesture.press_task(&task, date(2024, 6, 14), GrabRegion::EndEdge);
    gesture.pointer_move(date(2024, 6, 20));
    // Crossing past the start must be ignored, keeping the last valid end
    gesture.pointer_move(date(2024, 6, 8));
    let outcome = gesture.release().unwrap();
    assert_eq!(
        outcome,
        GestureOutcome::TaskDragged {
            id: 1,
            start_date: date(2024, 6, 10),
            end_date: date(2024, 6, 20),
        }
    );
}

#[test]
fn zero_displacement_drag_commits_original_dates() {
    let store = seeded_store();
    let mut gesture = GestureMachine::new();

    let task = store.get(1).cloned().unwrap();
    gesture.press_task(&task, date(2024, 6, 12), GrabRegion::Body);
    let outcome = gesture.release().unwrap();
    assert_eq!(
        outcome,
        GestureOutcome::TaskDragged {
            id: 1,
            start_date: date(2024, 6, 10),
            end_date: date(2024, 6, 14),
        }
    );
}

#[test]
fn stale_commit_after_delete_surfaces_not_found() {
    let mut store = seeded_store();
    let mut gesture = GestureMachine::new();

    let task = store.get(1).cloned().unwrap();
    gesture.press_task(&task, date(2024, 6, 10), GrabRegion::Body);
    gesture.pointer_move(date(2024, 6, 11));

    // Task vanishes mid-drag; the commit must fail cleanly
    assert!(store.delete(1));
    let Some(GestureOutcome::TaskDragged {
        id,
        start_date,
        end_date,
    }) = gesture.release()
    else {
        panic!("drag should emit");
    };
    assert!(store.update(id, TaskPatch::dates(start_date, end_date)).is_err());
}

#[test]
fn single_day_click_emits_a_one_day_selection() {
    let mut gesture = GestureMachine::new();
    gesture.press_cell(date(2024, 6, 3));
    let outcome = gesture.release().unwrap();
    assert_eq!(
        outcome,
        GestureOutcome::RangeSelected {
            start: date(2024, 6, 3),
            end: date(2024, 6, 3),
        }
    );
}
