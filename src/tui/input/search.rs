use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Search edits the filter criteria live: every keystroke re-derives the
/// visible set on the next draw
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => {
            app.criteria.search_query.push(c);
        }
        KeyCode::Backspace => {
            app.criteria.search_query.pop();
        }
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.criteria.search_query.clear();
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
