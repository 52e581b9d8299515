use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::{TaskDraft, TaskPatch};
use crate::ops::store::StoreError;
use crate::tui::app::{App, FormField, FormTarget, Mode};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.form else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Char(c) => {
            match form.field {
                FormField::Name => form.name.push(c),
                FormField::Description => form.description.push(c),
            }
            form.error = None;
        }
        KeyCode::Backspace => {
            match form.field {
                FormField::Name => form.name.pop(),
                FormField::Description => form.description.pop(),
            };
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
            form.field = match form.field {
                FormField::Name => FormField::Description,
                FormField::Description => FormField::Name,
            };
        }
        KeyCode::Right => {
            form.category = form.category.next();
        }
        KeyCode::Left => {
            form.category = form.category.prev();
        }
        KeyCode::Enter => {
            submit_form(app);
        }
        KeyCode::Esc => {
            app.form = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn submit_form(app: &mut App) {
    let Some(form) = app.form.clone() else {
        return;
    };

    // Empty description means "none", not an empty string
    let description = if form.description.trim().is_empty() {
        None
    } else {
        Some(form.description)
    };

    let result = match form.target {
        FormTarget::Create { start, end } => app
            .store
            .create(TaskDraft {
                name: form.name,
                category: form.category,
                start_date: start,
                end_date: end,
                description,
            })
            .map(|task| task.id),
        FormTarget::Edit { id } => {
            let patch = TaskPatch {
                name: Some(form.name),
                category: Some(form.category),
                description: Some(description),
                ..Default::default()
            };
            app.store.update(id, patch).map(|task| task.id)
        }
    };

    match result {
        Ok(id) => {
            app.selected = Some(id);
            app.form = None;
            app.mode = Mode::Navigate;
        }
        // Validation failure keeps the form open with the message inline
        Err(e @ (StoreError::EmptyName | StoreError::InvalidRange)) => {
            if let Some(form) = &mut app.form {
                form.error = Some(e.to_string());
            }
        }
        Err(e @ StoreError::NotFound(_)) => {
            app.message = Some(e.to_string());
            app.form = None;
            app.mode = Mode::Navigate;
        }
    }
}
