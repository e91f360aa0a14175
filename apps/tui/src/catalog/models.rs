use std::fmt;

use serde::Deserialize;

/// Identifier as written in the catalog file. Recent catalogs use plain
/// numbers, older ones quote them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EpisodeId {
    Number(i64),
    Text(String),
}

impl EpisodeId {
    /// Ordering key for the within-season sort. Text ids contribute their
    /// leading digits; anything non-numeric keys to 0.
    pub fn sort_key(&self) -> i64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One entry of the source catalog. Read-only after load; nothing in the
/// application mutates or persists these back.
#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    pub season: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::EpisodeId;

    #[test]
    fn numeric_ids_key_to_their_value() {
        assert_eq!(EpisodeId::Number(42).sort_key(), 42);
    }

    #[test]
    fn text_ids_key_to_their_leading_digits() {
        assert_eq!(EpisodeId::Text("12b".to_string()).sort_key(), 12);
        assert_eq!(EpisodeId::Text("bonus".to_string()).sort_key(), 0);
    }

    #[test]
    fn display_matches_the_source_form() {
        assert_eq!(EpisodeId::Number(7).to_string(), "7");
        assert_eq!(EpisodeId::Text("7a".to_string()).to_string(), "7a");
    }
}
