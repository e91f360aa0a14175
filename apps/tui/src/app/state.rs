use std::time::Instant;

use crate::catalog::{Catalog, CatalogEntry, CatalogError, Episode};

/// The three ways the grid can be projected. A single tagged value instead
/// of a season flag and a search string that have to agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    SeasonView(String),
    SearchResults {
        term: String,
        from_season: Option<String>,
    },
}

/// Copyable discriminant used by input and render dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Browsing,
    Season,
    Search,
}

/// Inputs of the view transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SearchEdited(String),
    SeasonPicked(String),
    Back,
}

impl ViewMode {
    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Browsing => ViewKind::Browsing,
            Self::SeasonView(_) => ViewKind::Season,
            Self::SearchResults { .. } => ViewKind::Search,
        }
    }

    pub fn search_term(&self) -> &str {
        match self {
            Self::SearchResults { term, .. } => term,
            Self::Browsing | Self::SeasonView(_) => "",
        }
    }

    /// The season the grid would show if no search were active.
    pub fn season_context(&self) -> Option<&str> {
        match self {
            Self::Browsing => None,
            Self::SeasonView(season) => Some(season),
            Self::SearchResults { from_season, .. } => from_season.as_deref(),
        }
    }

    /// The one place view transitions happen. An active search always wins
    /// over season selection: season picks while searching are dropped, and
    /// clearing the term restores whichever season was selected before.
    #[must_use]
    pub fn transition(self, event: ViewEvent) -> Self {
        match (self, event) {
            (mode, ViewEvent::SearchEdited(term)) => {
                let from_season = mode.season_context().map(str::to_string);
                if term.is_empty() {
                    from_season.map_or(Self::Browsing, Self::SeasonView)
                } else {
                    Self::SearchResults { term, from_season }
                }
            }
            (Self::Browsing | Self::SeasonView(_), ViewEvent::SeasonPicked(season)) => {
                Self::SeasonView(season)
            }
            (mode @ Self::SearchResults { .. }, ViewEvent::SeasonPicked(_)) => mode,
            (_, ViewEvent::Back) => Self::Browsing,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub loading: bool,
    pub catalog: Option<Catalog>,
    pub load_error: Option<String>,
    pub view: ViewMode,
    pub search_editing: bool,
    pub selected_index: usize,
    pub details_open: bool,
    pub show_help: bool,
    pub status_message: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            loading: true,
            catalog: None,
            load_error: None,
            view: ViewMode::Browsing,
            search_editing: false,
            selected_index: 0,
            details_open: false,
            show_help: false,
            status_message: String::new(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }
    }

    /// Settles the one-shot catalog load.
    pub fn finish_load(&mut self, result: Result<Vec<Episode>, CatalogError>) {
        match result {
            Ok(episodes) => {
                self.loading = false;
                let catalog = Catalog::from_episodes(episodes);
                self.status_message = format!("{} episodes loaded", catalog.len());
                self.catalog = Some(catalog);
            }
            Err(error) => self.fail_load(&error.to_string()),
        }
    }

    /// The single fault path: the hero region shows the message and the
    /// rest of the session stays in its empty initial state.
    pub fn fail_load(&mut self, detail: &str) {
        self.loading = false;
        self.load_error = Some("Error loading programs.".to_string());
        self.status_message = format!("Error: {detail}");
    }

    pub fn search_term(&self) -> &str {
        self.view.search_term()
    }

    /// Replaces the search term; the empty term reverts to season browsing.
    pub fn set_search(&mut self, term: String) {
        self.view = self.view.clone().transition(ViewEvent::SearchEdited(term));
        self.selected_index = 0;
    }

    pub fn push_search_char(&mut self, ch: char) {
        let mut term = self.search_term().to_string();
        term.push(ch);
        self.set_search(term);
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.search_term().to_string();
        term.pop();
        self.set_search(term);
    }

    /// Only meaningful outside of search; the transition drops it otherwise.
    pub fn select_season(&mut self, label: String) {
        self.view = self.view.clone().transition(ViewEvent::SeasonPicked(label));
        self.selected_index = 0;
    }

    /// The back action: season-browsing mode with an empty search field.
    pub fn reset(&mut self) {
        self.view = self.view.clone().transition(ViewEvent::Back);
        self.search_editing = false;
        self.selected_index = 0;
        self.details_open = false;
        self.status_message.clear();
    }

    /// Number of rows the grid currently shows.
    pub fn grid_len(&self) -> usize {
        let Some(catalog) = &self.catalog else {
            return 0;
        };
        match &self.view {
            ViewMode::Browsing => catalog.seasons().len(),
            ViewMode::SeasonView(season) => catalog.season_episodes(season).len(),
            ViewMode::SearchResults { term, .. } => catalog.search(term).len(),
        }
    }

    /// The episode row under the cursor, when the grid shows episodes.
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        let catalog = self.catalog.as_ref()?;
        match &self.view {
            ViewMode::Browsing => None,
            ViewMode::SeasonView(season) => catalog
                .season_episodes(season)
                .get(self.selected_index)
                .copied(),
            ViewMode::SearchResults { term, .. } => {
                catalog.search(term).get(self.selected_index).copied()
            }
        }
    }

    /// The season row under the cursor in browsing mode.
    pub fn selected_season(&self) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        match &self.view {
            ViewMode::Browsing => catalog
                .seasons()
                .get(self.selected_index)
                .map(|summary| summary.label.clone()),
            ViewMode::SeasonView(_) | ViewMode::SearchResults { .. } => None,
        }
    }

    pub fn open_details(&mut self) {
        if self.selected_entry().is_some() {
            self.details_open = true;
        }
    }

    pub fn close_details(&mut self) {
        self.details_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{App, ViewEvent, ViewMode};
    use crate::catalog::models::{Episode, EpisodeId};

    fn episode(id: i64, title: &str, season: &str, date: &str, hidden: bool) -> Episode {
        Episode {
            id: EpisodeId::Number(id),
            title: title.to_string(),
            season: season.to_string(),
            date: date.to_string(),
            summary: String::new(),
            challenge: None,
            link: None,
            hidden,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.finish_load(Ok(vec![
            episode(1, "Ep1", "T1", "2024-01-01", false),
            episode(2, "Ep2", "T1", "2024-02-01", false),
            episode(3, "Ep3", "T2", "2024-03-01", false),
        ]));
        app
    }

    #[test]
    fn a_nonempty_search_takes_over_from_any_mode() {
        let mode = ViewMode::SeasonView("T1".to_string())
            .transition(ViewEvent::SearchEdited("finale".to_string()));
        assert_eq!(
            mode,
            ViewMode::SearchResults {
                term: "finale".to_string(),
                from_season: Some("T1".to_string()),
            }
        );
    }

    #[test]
    fn clearing_the_search_restores_the_prior_season() {
        let mode = ViewMode::SearchResults {
            term: "finale".to_string(),
            from_season: Some("T1".to_string()),
        }
        .transition(ViewEvent::SearchEdited(String::new()));
        assert_eq!(mode, ViewMode::SeasonView("T1".to_string()));
    }

    #[test]
    fn clearing_the_search_without_a_season_goes_back_to_browsing() {
        let mode = ViewMode::SearchResults {
            term: "x".to_string(),
            from_season: None,
        }
        .transition(ViewEvent::SearchEdited(String::new()));
        assert_eq!(mode, ViewMode::Browsing);
    }

    #[test]
    fn season_picks_are_dropped_while_searching() {
        let searching = ViewMode::SearchResults {
            term: "x".to_string(),
            from_season: None,
        };
        let mode = searching
            .clone()
            .transition(ViewEvent::SeasonPicked("T2".to_string()));
        assert_eq!(mode, searching);
    }

    #[test]
    fn back_always_lands_in_browsing() {
        let mode = ViewMode::SeasonView("T1".to_string()).transition(ViewEvent::Back);
        assert_eq!(mode, ViewMode::Browsing);
    }

    #[test]
    fn reset_clears_the_search_field_and_selection() {
        let mut app = loaded_app();
        app.select_season("T1".to_string());
        app.set_search("march".to_string());
        app.selected_index = 1;

        app.reset();

        assert_eq!(app.view, ViewMode::Browsing);
        assert_eq!(app.search_term(), "");
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn the_grid_counts_follow_the_view_mode() {
        let mut app = loaded_app();
        assert_eq!(app.grid_len(), 2); // two seasons

        app.select_season("T1".to_string());
        assert_eq!(app.grid_len(), 2); // two episodes in T1

        app.set_search("ep3".to_string());
        assert_eq!(app.grid_len(), 1);
    }

    #[test]
    fn details_only_open_on_episode_rows() {
        let mut app = loaded_app();
        app.open_details();
        assert!(!app.details_open); // browsing rows are seasons

        app.select_season("T1".to_string());
        app.open_details();
        assert!(app.details_open);
    }

    #[test]
    fn a_failed_load_keeps_the_rest_of_the_state_empty() {
        let mut app = App::new();
        app.fail_load("catalog request returned status 404");

        assert!(!app.loading);
        assert_eq!(app.load_error.as_deref(), Some("Error loading programs."));
        assert_eq!(app.grid_len(), 0);
        assert!(app.selected_entry().is_none());
    }
}
