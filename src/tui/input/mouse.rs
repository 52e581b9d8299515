use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::model::task::TaskPatch;
use crate::ops::gesture::GestureOutcome;
use crate::ops::store::StoreError;
use crate::tui::app::{App, DOUBLE_CLICK_WINDOW, FormState, HitTarget, Mode, PressState};

/// Route a mouse event into the gesture machine. Pointer input only drives
/// the calendar, so popup modes swallow it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate || app.show_help {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => on_press(app, mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => on_drag(app, mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => on_release(app),
        _ => {}
    }
}

/// Pointer left the surface (terminal focus lost): commit like a release,
/// but never as a click
pub fn handle_pointer_leave(app: &mut App) {
    app.press = None;
    app.last_click = None;
    if let Some(outcome) = app.gesture.release() {
        apply_outcome(app, outcome);
    }
}

fn on_press(app: &mut App, column: u16, row: u16) {
    // A second Down while a gesture is active means we missed the Up (the
    // machine would reject the press anyway); don't track a click for it
    if app.gesture.is_active() {
        return;
    }
    let Some(target) = app.hit_at(column, row) else {
        return;
    };
    match target {
        HitTarget::DayCell(date) => {
            app.press = Some(PressState {
                date,
                task: None,
                moved: false,
            });
            app.gesture.press_cell(date);
        }
        HitTarget::TaskBar { id, date, region } => {
            let Some(task) = app.store.get(id) else {
                return;
            };
            app.press = Some(PressState {
                date,
                task: Some(id),
                moved: false,
            });
            app.gesture.press_task(task, date, region);
        }
    }
}

fn on_drag(app: &mut App, column: u16, row: u16) {
    let Some(date) = app.date_at(column, row) else {
        return;
    };
    if let Some(press) = &mut app.press
        && date != press.date
    {
        press.moved = true;
    }
    app.gesture.pointer_move(date);
}

fn on_release(app: &mut App) {
    let press = app.press.take();
    if let Some(outcome) = app.gesture.release() {
        apply_outcome(app, outcome);
    }

    // Native click semantics on top of the same press: a press on a task bar
    // that never crossed into another cell is a click (select) or, within
    // the double-click window, an edit request
    let Some(press) = press else {
        return;
    };
    let Some(id) = press.task else {
        return;
    };
    if press.moved {
        app.last_click = None;
        return;
    }

    let now = Instant::now();
    let is_double = app
        .last_click
        .take()
        .is_some_and(|(last_id, at)| last_id == id && now.duration_since(at) <= DOUBLE_CLICK_WINDOW);

    app.selected = Some(id);
    if is_double {
        if let Some(task) = app.store.get(id) {
            app.form = Some(FormState::edit(task));
            app.mode = Mode::TaskForm;
        }
    } else {
        app.last_click = Some((id, now));
    }
}

fn apply_outcome(app: &mut App, outcome: GestureOutcome) {
    match outcome {
        GestureOutcome::RangeSelected { start, end } => {
            app.form = Some(FormState::create(start, end));
            app.mode = Mode::TaskForm;
        }
        GestureOutcome::TaskDragged {
            id,
            start_date,
            end_date,
        } => match app.store.update(id, TaskPatch::dates(start_date, end_date)) {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                // Stale id — the task went away mid-drag; drop the commit
                app.message = Some(format!("task {id} no longer exists"));
            }
            Err(e) => {
                app.message = Some(e.to_string());
            }
        },
    }
}
