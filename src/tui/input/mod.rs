mod confirm;
mod form;
mod mouse;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

pub use mouse::{handle_mouse, handle_pointer_leave};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any keypress clears a transient status message
    app.message = None;

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::TaskForm => form::handle_form(app, key),
        Mode::ConfirmDelete => confirm::handle_confirm(app, key),
    }
}
