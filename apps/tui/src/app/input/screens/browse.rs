use crate::app::state::App;
use crossterm::event::KeyCode;

use super::handle_grid_navigation;

pub fn handle_browse_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('/') => {
            app.search_editing = true;
        }
        KeyCode::Enter => {
            // Opening a season lands the selection on its first episode.
            if let Some(season) = app.selected_season() {
                app.select_season(season);
            }
        }
        other => handle_grid_navigation(app, other),
    }
}
