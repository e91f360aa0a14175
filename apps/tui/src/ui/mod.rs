// UI module for catalog-browser
// Handles all UI rendering functions

pub mod screens;
pub mod typeset;
pub mod widgets;

use crate::app::state::ViewKind;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    if app.show_help {
        screens::help::render_help(f);
        return;
    }

    match app.view.kind() {
        ViewKind::Browsing => screens::browse::render_browse(app, f),
        ViewKind::Season => screens::season::render_season(app, f),
        ViewKind::Search => screens::search::render_search(app, f),
    }

    if app.details_open {
        screens::details::render_details(app, f);
    }
}
