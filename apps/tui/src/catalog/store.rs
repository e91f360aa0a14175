use chrono::NaiveDate;

use crate::domain::{parse_display_date, season_ordinal};

use super::models::Episode;

/// A visible episode enriched with the parsed values the orderings need.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub episode: Episode,
    pub date_value: Option<NaiveDate>,
    pub season_ordinal: u32,
}

/// One row of the season overview: a distinct season label with its
/// episode count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSummary {
    pub label: String,
    pub ordinal: u32,
    pub count: usize,
}

/// The catalog after the one-time load: hidden records dropped, the rest
/// held immutable for the session, newest first.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    hidden_count: usize,
}

impl Catalog {
    pub fn from_episodes(episodes: Vec<Episode>) -> Self {
        let total = episodes.len();
        let mut entries: Vec<CatalogEntry> = episodes
            .into_iter()
            .filter(|episode| !episode.hidden)
            .map(|episode| {
                let date_value = parse_display_date(&episode.date);
                let season_ordinal = season_ordinal(&episode.season);
                CatalogEntry {
                    episode,
                    date_value,
                    season_ordinal,
                }
            })
            .collect();
        let hidden_count = total - entries.len();

        // Newest first. The sort is stable, so same-date records keep their
        // input order and the hero is always the first entry.
        entries.sort_by(|a, b| b.date_value.cmp(&a.date_value));

        Self {
            entries,
            hidden_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    /// The record with the maximum parsed date, shown as the hero card.
    pub fn latest(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    /// Each distinct season exactly once, with its episode count, ordered
    /// ascending by the ordinal extracted from the label.
    pub fn seasons(&self) -> Vec<SeasonSummary> {
        let mut summaries: Vec<SeasonSummary> = Vec::new();
        for entry in &self.entries {
            if let Some(summary) = summaries
                .iter_mut()
                .find(|summary| summary.label == entry.episode.season)
            {
                summary.count += 1;
            } else {
                summaries.push(SeasonSummary {
                    label: entry.episode.season.clone(),
                    ordinal: entry.season_ordinal,
                    count: 1,
                });
            }
        }
        summaries.sort_by_key(|summary| summary.ordinal);
        summaries
    }

    /// Episodes of one season, ascending by id.
    pub fn season_episodes(&self, label: &str) -> Vec<&CatalogEntry> {
        let mut episodes: Vec<&CatalogEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.episode.season == label)
            .collect();
        episodes.sort_by_key(|entry| entry.episode.id.sort_key());
        episodes
    }

    /// Case-insensitive substring search over title, summary, challenge and
    /// the raw date string. Season selection plays no part while searching.
    pub fn search(&self, term: &str) -> Vec<&CatalogEntry> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry_matches(entry, &needle))
            .collect()
    }
}

fn entry_matches(entry: &CatalogEntry, needle: &str) -> bool {
    let episode = &entry.episode;
    episode.title.to_lowercase().contains(needle)
        || episode.summary.to_lowercase().contains(needle)
        || episode
            .challenge
            .as_deref()
            .is_some_and(|challenge| challenge.to_lowercase().contains(needle))
        || episode.date.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::Catalog;
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

    fn sample() -> Catalog {
        Catalog::from_episodes(vec![
            Episode {
                summary: "intro".to_string(),
                ..episode(1, "Ep1", "T1", "2024-01-01", false)
            },
            Episode {
                summary: "finale".to_string(),
                ..episode(2, "Ep2", "T1", "2024-02-01", true)
            },
            Episode {
                challenge: Some("Compute $\\pi$".to_string()),
                ..episode(4, "Ep4", "Temporada 2", "2024-04-01", false)
            },
            episode(3, "Ep3", "Temporada 2", "2024-03-01", false),
        ])
    }

    #[test]
    fn hidden_records_never_enter_the_visible_set() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.hidden_count(), 1);
        assert!(catalog
            .season_episodes("T1")
            .iter()
            .all(|entry| entry.episode.title != "Ep2"));
    }

    #[test]
    fn the_hero_is_the_record_with_the_maximum_date() {
        let catalog = sample();
        let latest = catalog.latest().map(|entry| entry.episode.title.as_str());
        assert_eq!(latest, Some("Ep4"));
    }

    #[test]
    fn date_ties_keep_input_order() {
        let catalog = Catalog::from_episodes(vec![
            episode(1, "First", "T1", "2024-01-01", false),
            episode(2, "Second", "T1", "2024-01-01", false),
        ]);
        let latest = catalog.latest().map(|entry| entry.episode.title.as_str());
        assert_eq!(latest, Some("First"));
    }

    #[test]
    fn unparseable_dates_sort_below_parsed_ones() {
        let catalog = Catalog::from_episodes(vec![
            episode(1, "Undated", "T1", "someday", false),
            episode(2, "Dated", "T1", "2020-01-01", false),
        ]);
        let latest = catalog.latest().map(|entry| entry.episode.title.as_str());
        assert_eq!(latest, Some("Dated"));
    }

    #[test]
    fn seasons_list_each_label_once_in_ordinal_order() {
        let catalog = sample();
        let seasons = catalog.seasons();
        let labels: Vec<(&str, usize)> = seasons
            .iter()
            .map(|summary| (summary.label.as_str(), summary.count))
            .collect();
        assert_eq!(labels, vec![("T1", 1), ("Temporada 2", 2)]);
    }

    #[test]
    fn unnumbered_seasons_sort_first() {
        let catalog = Catalog::from_episodes(vec![
            episode(1, "Ep1", "Temporada 1", "2024-01-01", false),
            episode(2, "Ep2", "Specials", "2024-02-01", false),
        ]);
        let labels: Vec<String> = catalog
            .seasons()
            .into_iter()
            .map(|summary| summary.label)
            .collect();
        assert_eq!(labels, vec!["Specials", "Temporada 1"]);
    }

    #[test]
    fn season_episodes_come_back_ascending_by_id() {
        let catalog = sample();
        let ids: Vec<String> = catalog
            .season_episodes("Temporada 2")
            .iter()
            .map(|entry| entry.episode.id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[test]
    fn search_is_case_insensitive_across_the_text_fields() {
        let catalog = sample();
        assert_eq!(catalog.search("INTRO").len(), 1);
        assert_eq!(catalog.search("ep4").len(), 1);
        assert_eq!(catalog.search("2024-03").len(), 1);
        // challenge text is searchable too
        assert_eq!(catalog.search("compute").len(), 1);
    }

    #[test]
    fn records_without_a_challenge_still_match_on_other_fields() {
        let catalog = sample();
        let matches = catalog.search("ep3");
        assert_eq!(matches.len(), 1);
        assert!(matches[0].episode.challenge.is_none());
    }

    #[test]
    fn hidden_records_never_show_up_in_search_results() {
        // "finale" only exists on the hidden Ep2
        let catalog = sample();
        assert!(catalog.search("finale").is_empty());
    }

    #[test]
    fn the_empty_term_matches_nothing() {
        let catalog = sample();
        assert!(catalog.search("").is_empty());
    }
}
