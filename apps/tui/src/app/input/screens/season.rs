use crate::app::state::App;
use crossterm::event::KeyCode;

use super::handle_grid_navigation;

pub fn handle_season_input(app: &mut App, key: KeyCode) {
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
