use crossterm::event::{KeyCode, KeyEvent};

use crate::model::filter::TimeRange;
use crate::model::task::CATEGORIES;
use crate::ops::grid::shift_months;
use crate::tui::app::{App, FormState, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }

        // Month navigation
        KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => {
            app.focus = shift_months(app.focus, -1);
        }
        KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => {
            app.focus = shift_months(app.focus, 1);
        }
        KeyCode::Char('t') => {
            app.focus = app.today;
        }

        // Filters
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            app.criteria.toggle_category(CATEGORIES[idx]);
        }
        KeyCode::Char('w') => {
            app.criteria.time_range = TimeRange::cycle(app.criteria.time_range);
        }
        KeyCode::Char('c') => {
            app.criteria.clear();
        }

        // Task actions on the current selection
        KeyCode::Char('n') => {
            app.form = Some(FormState::create(app.today, app.today));
            app.mode = Mode::TaskForm;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(task) = app.selected_task() {
                app.form = Some(FormState::edit(task));
                app.mode = Mode::TaskForm;
            }
        }
        KeyCode::Char('x') | KeyCode::Char('d') => {
            if let Some(id) = app.selected {
                app.pending_delete = Some(id);
                app.mode = Mode::ConfirmDelete;
            }
        }

        KeyCode::Esc => {
            app.selected = None;
        }
        _ => {}
    }
}
