use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            if let Some(id) = app.pending_delete.take() {
                if !app.store.delete(id) {
                    app.message = Some(format!("task {id} no longer exists"));
                }
                if app.selected == Some(id) {
                    app.selected = None;
                }
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.pending_delete = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
