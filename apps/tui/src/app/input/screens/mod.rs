use crate::app::state::{App, ViewKind};
use crossterm::event::KeyCode;

mod browse;
mod details;
mod help;
mod search;
mod season;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.details_open {
        details::handle_details_input(app, key);
        return;
    }

    if app.search_editing {
        search::handle_search_editing(app, key);
        return;
    }

    match app.view.kind() {
        ViewKind::Browsing => browse::handle_browse_input(app, key),
        ViewKind::Season => season::handle_season_input(app, key),
        ViewKind::Search => search::handle_search_results_input(app, key),
    }
}

/// Shared grid navigation for every listing screen.
pub(crate) fn handle_grid_navigation(app: &mut App, key: KeyCode) {
    let total_rows = app.grid_len();

    match key {
        KeyCode::Up => {
            if app.selected_index > 0 {
                app.selected_index -= 1;
            }
        }
        KeyCode::Down => {
            if total_rows > 0 && app.selected_index + 1 < total_rows {
                app.selected_index += 1;
            }
        }
        KeyCode::PageUp => {
            if app.selected_index > 0 {
                app.selected_index = app.selected_index.saturating_sub(5);
            }
        }
        KeyCode::PageDown => {
            if total_rows > 0 {
                let new_index = app.selected_index + 5;
                app.selected_index = if new_index >= total_rows {
                    total_rows - 1
                } else {
                    new_index
                };
            }
        }
        KeyCode::Home => {
            app.selected_index = 0;
        }
        KeyCode::End => {
            if total_rows > 0 {
                app.selected_index = total_rows - 1;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::dispatch_input;
    use crate::app::state::{App, ViewMode};
    use crate::catalog::models::{Episode, EpisodeId};
    use crossterm::event::KeyCode;

    fn episode(id: i64, title: &str, season: &str, date: &str) -> Episode {
        Episode {
            id: EpisodeId::Number(id),
            title: title.to_string(),
            season: season.to_string(),
            date: date.to_string(),
            summary: String::new(),
            challenge: None,
            link: None,
            hidden: false,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.finish_load(Ok(vec![
            episode(1, "Ep1", "T1", "2024-01-01"),
            episode(2, "Ep2", "T1", "2024-02-01"),
            episode(3, "Ep3", "T2", "2024-03-01"),
        ]));
        app
    }

    #[test]
    fn enter_on_a_season_card_opens_the_season() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Enter);
        assert_eq!(app.view, ViewMode::SeasonView("T1".to_string()));
    }

    #[test]
    fn typing_after_slash_filters_live() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Char('/'));
        dispatch_input(&mut app, KeyCode::Char('e'));
        dispatch_input(&mut app, KeyCode::Char('p'));
        dispatch_input(&mut app, KeyCode::Char('3'));

        assert_eq!(app.search_term(), "ep3");
        assert_eq!(app.grid_len(), 1);
    }

    #[test]
    fn escape_while_editing_clears_the_term_and_reverts() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Enter); // into T1
        dispatch_input(&mut app, KeyCode::Char('/'));
        dispatch_input(&mut app, KeyCode::Char('x'));
        dispatch_input(&mut app, KeyCode::Esc);

        assert!(!app.search_editing);
        assert_eq!(app.view, ViewMode::SeasonView("T1".to_string()));
        assert_eq!(app.search_term(), "");
    }

    #[test]
    fn backspacing_the_last_char_restores_the_prior_season() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Enter); // into T1
        dispatch_input(&mut app, KeyCode::Char('/'));
        dispatch_input(&mut app, KeyCode::Char('x'));
        dispatch_input(&mut app, KeyCode::Backspace);

        assert_eq!(app.view, ViewMode::SeasonView("T1".to_string()));
    }

    #[test]
    fn escape_in_a_season_goes_back_to_browsing() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Enter);
        dispatch_input(&mut app, KeyCode::Esc);
        assert_eq!(app.view, ViewMode::Browsing);
    }

    #[test]
    fn enter_on_an_episode_row_opens_and_escape_closes_details() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Enter); // into T1
        dispatch_input(&mut app, KeyCode::Enter); // open details
        assert!(app.details_open);

        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.details_open);
        assert_eq!(app.view, ViewMode::SeasonView("T1".to_string()));
    }

    #[test]
    fn selection_stays_inside_the_grid() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::Enter); // T1: two episodes
        dispatch_input(&mut app, KeyCode::Down);
        dispatch_input(&mut app, KeyCode::Down);
        dispatch_input(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index, 1);

        dispatch_input(&mut app, KeyCode::Home);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn help_swallows_other_keys_until_dismissed() {
        let mut app = loaded_app();
        dispatch_input(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        dispatch_input(&mut app, KeyCode::Enter);
        assert_eq!(app.view, ViewMode::Browsing);

        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
