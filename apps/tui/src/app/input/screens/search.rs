use crate::app::state::App;
use crossterm::event::KeyCode;

use super::handle_grid_navigation;

/// Live edit of the search field; every keystroke re-filters the grid.
pub fn handle_search_editing(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.search_editing = false;
            app.set_search(String::new());
        }
        KeyCode::Enter => {
            app.search_editing = false;
        }
        KeyCode::Backspace => {
            app.pop_search_char();
        }
        KeyCode::Char(ch) => {
            app.push_search_char(ch);
        }
        _ => {}
    }
}

/// Navigating a finished search result list.
pub fn handle_search_results_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('/') => {
            app.search_editing = true;
        }
        KeyCode::Enter => {
            app.open_details();
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.reset();
        }
        other => handle_grid_navigation(app, other),
    }
}
