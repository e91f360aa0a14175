use chrono::NaiveDate;

/// Extracts the numeric ordinal embedded in a season label by concatenating
/// its digits: "Temporada 3" -> 3, "T12" -> 12. Labels without digits map
/// to 0 and therefore sort ahead of every numbered season.
pub fn season_ordinal(label: &str) -> u32 {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Parses the display date of an episode into a comparable value.
///
/// Catalogs write ISO dates, occasionally with a time suffix; older entries
/// use day-first forms. Anything else is unparseable and sorts below every
/// parsed date.
pub fn parse_display_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let head = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%d/%m/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(head, "%d-%m-%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_display_date, season_ordinal};
    use chrono::NaiveDate;

    #[test]
    fn ordinal_comes_from_the_digits_of_the_label() {
        assert_eq!(season_ordinal("Temporada 3"), 3);
        assert_eq!(season_ordinal("Season 12"), 12);
        assert_eq!(season_ordinal("T2"), 2);
    }

    #[test]
    fn labels_without_digits_map_to_zero() {
        assert_eq!(season_ordinal("Specials"), 0);
        assert_eq!(season_ordinal(""), 0);
    }

    #[test]
    fn iso_dates_parse() {
        assert_eq!(
            parse_display_date("2024-03-14"),
            NaiveDate::from_ymd_opt(2024, 3, 14)
        );
    }

    #[test]
    fn datetime_suffixes_are_ignored() {
        assert_eq!(
            parse_display_date("2024-03-14T10:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 14)
        );
    }

    #[test]
    fn day_first_dates_parse() {
        assert_eq!(
            parse_display_date("14/03/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 14)
        );
    }

    #[test]
    fn garbage_dates_are_none() {
        assert_eq!(parse_display_date("next friday"), None);
        assert_eq!(parse_display_date(""), None);
    }
}
