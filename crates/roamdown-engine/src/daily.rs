//! Daily-note title formatting and date-query resolution.
//!
//! The remote backend names daily pages like "July 6th, 2024"; everything
//! here is pure — callers pass in "today" so nothing reads the clock.

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

static ISO_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn iso_date_re() -> &'static Regex {
    ISO_DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date regex"))
}

/// Formats a date as a daily-note page title, e.g. "July 6th, 2024".
pub fn daily_note_title(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match day {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{} {}{}, {}", date.format("%B"), day, suffix, date.year())
}

/// True for strict `YYYY-MM-DD` strings that name a real calendar date.
pub fn is_iso_date(s: &str) -> bool {
    iso_date_re().is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Resolves a date query — `today`, `yesterday`, `lastweek`, or an ISO
/// date — relative to the supplied `today`. Anything else is `None`.
pub fn resolve_date_query(query: &str, today: NaiveDate) -> Option<NaiveDate> {
    match query {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        "lastweek" => today.checked_sub_days(Days::new(7)),
        other if is_iso_date(other) => NaiveDate::parse_from_str(other, "%Y-%m-%d").ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(2024, 7, 1, "July 1st, 2024")]
    #[case(2024, 7, 2, "July 2nd, 2024")]
    #[case(2024, 7, 3, "July 3rd, 2024")]
    #[case(2024, 7, 4, "July 4th, 2024")]
    #[case(2024, 7, 11, "July 11th, 2024")]
    #[case(2024, 7, 12, "July 12th, 2024")]
    #[case(2024, 7, 13, "July 13th, 2024")]
    #[case(2024, 7, 21, "July 21st, 2024")]
    #[case(2024, 12, 22, "December 22nd, 2024")]
    #[case(2024, 1, 31, "January 31st, 2024")]
    fn ordinal_titles(#[case] y: i32, #[case] m: u32, #[case] d: u32, #[case] expected: &str) {
        assert_eq!(daily_note_title(date(y, m, d)), expected);
    }

    #[rstest]
    #[case("2024-07-04", true)]
    #[case("2024-7-4", false)]
    #[case("2024-13-01", false)]
    #[case("not a date", false)]
    #[case("", false)]
    fn iso_date_detection(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_iso_date(input), expected);
    }

    #[test]
    fn relative_queries_resolve_against_supplied_today() {
        let today = date(2024, 7, 8);
        assert_eq!(resolve_date_query("today", today), Some(today));
        assert_eq!(resolve_date_query("yesterday", today), Some(date(2024, 7, 7)));
        assert_eq!(resolve_date_query("lastweek", today), Some(date(2024, 7, 1)));
        assert_eq!(
            resolve_date_query("2024-02-29", today),
            Some(date(2024, 2, 29))
        );
        assert_eq!(resolve_date_query("Some Page", today), None);
    }
}
