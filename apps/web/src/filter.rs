//! Pure catalog projections shared by the render and key handlers. Kept
//! free of browser types so they run under plain `cargo test`.

use crate::Episode;

/// Digits of the season label, concatenated: "Temporada 3" -> 3. Labels
/// without digits map to 0.
pub fn season_ordinal(label: &str) -> u32 {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// A comparable key for the display date. ISO dates compare correctly as
/// (year, month, day); unparseable dates key to None and sort last.
pub fn date_key(raw: &str) -> Option<(u16, u8, u8)> {
    let head = raw.trim().split(['T', ' ']).next().unwrap_or("");
    let mut parts = head.split('-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    if parts.next().is_some() || month > 12 || day > 31 {
        return None;
    }
    Some((year, month, day))
}

/// Drops hidden records and orders the rest newest first (stable, so
/// same-date records keep their input order and index 0 is the hero).
pub fn visible_episodes(episodes: &[Episode]) -> Vec<Episode> {
    let mut visible: Vec<Episode> = episodes
        .iter()
        .filter(|episode| !episode.hidden)
        .cloned()
        .collect();
    visible.sort_by(|a, b| date_key(&b.date).cmp(&date_key(&a.date)));
    visible
}

/// Each distinct season once with its episode count, ordinal ascending.
pub fn season_summaries(episodes: &[Episode]) -> Vec<(String, usize)> {
    let mut seasons: Vec<(String, usize)> = Vec::new();
    for episode in episodes {
        if let Some(entry) = seasons.iter_mut().find(|(label, _)| *label == episode.season) {
            entry.1 += 1;
        } else {
            seasons.push((episode.season.clone(), 1));
        }
    }
    seasons.sort_by_key(|(label, _)| season_ordinal(label));
    seasons
}

/// One season's episodes, ascending by id.
pub fn season_episodes(episodes: &[Episode], season: &str) -> Vec<Episode> {
    let mut selected: Vec<Episode> = episodes
        .iter()
        .filter(|episode| episode.season == season)
        .cloned()
        .collect();
    selected.sort_by_key(|episode| episode.id_key());
    selected
}

/// Case-insensitive substring match across title, summary, challenge and
/// the raw date. Records without a challenge still match on the rest.
pub fn matches_search(episode: &Episode, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return false;
    }
    episode.title.to_lowercase().contains(&needle)
        || episode.summary.to_lowercase().contains(&needle)
        || episode
            .challenge
            .as_deref()
            .is_some_and(|challenge| challenge.to_lowercase().contains(&needle))
        || episode.date.to_lowercase().contains(&needle)
}

/// Strips the `$...$` math markup down to plain text for grid cells and
/// the detail popup; only the delimiters and braces need to go.
pub fn plain_math(text: &str) -> String {
    text.chars()
        .filter(|ch| !matches!(ch, '$' | '{' | '}' | '\\'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        date_key, matches_search, plain_math, season_episodes, season_ordinal, season_summaries,
        visible_episodes,
    };
    use crate::Episode;

    fn episode(id: i64, title: &str, season: &str, date: &str, hidden: bool) -> Episode {
        Episode {
            id: serde_json::Value::from(id),
            title: title.to_string(),
            season: season.to_string(),
            date: date.to_string(),
            summary: String::new(),
            challenge: None,
            link: None,
            hidden,
        }
    }

    #[test]
    fn ordinals_come_from_label_digits() {
        assert_eq!(season_ordinal("Temporada 3"), 3);
        assert_eq!(season_ordinal("Specials"), 0);
    }

    #[test]
    fn date_keys_order_like_dates() {
        assert!(date_key("2024-02-01") > date_key("2024-01-31"));
        assert_eq!(date_key("someday"), None);
    }

    #[test]
    fn hidden_episodes_are_dropped_and_newest_is_first() {
        let episodes = vec![
            episode(1, "Old", "T1", "2024-01-01", false),
            episode(2, "Hidden", "T1", "2024-03-01", true),
            episode(3, "New", "T1", "2024-02-01", false),
        ];
        let visible = visible_episodes(&episodes);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].title, "New");
    }

    #[test]
    fn seasons_are_summarized_once_in_ordinal_order() {
        let episodes = vec![
            episode(1, "A", "T2", "2024-01-01", false),
            episode(2, "B", "T1", "2024-02-01", false),
            episode(3, "C", "T2", "2024-03-01", false),
        ];
        assert_eq!(
            season_summaries(&episodes),
            vec![("T1".to_string(), 1), ("T2".to_string(), 2)]
        );
    }

    #[test]
    fn season_episodes_sort_by_id() {
        let episodes = vec![
            episode(4, "Later", "T1", "2024-01-01", false),
            episode(2, "Earlier", "T1", "2024-02-01", false),
        ];
        let selected = season_episodes(&episodes, "T1");
        assert_eq!(selected[0].title, "Earlier");
    }

    #[test]
    fn search_spans_the_text_fields_case_insensitively() {
        let mut subject = episode(1, "Pi day", "T1", "2024-03-14", false);
        subject.challenge = Some("Compute the area".to_string());

        assert!(matches_search(&subject, "PI"));
        assert!(matches_search(&subject, "area"));
        assert!(matches_search(&subject, "2024-03"));
        assert!(!matches_search(&subject, ""));
    }

    #[test]
    fn math_markup_is_stripped_for_grid_cells() {
        assert_eq!(plain_math("area $pi r^2$"), "area pi r^2");
    }
}
