//! Date utilities: canonical `MM/DD` normalization, date-token extraction and
//! the calendar helpers used by the CLI.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static MMDD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})$").unwrap());
static DASH_MD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})$").unwrap());
static SLASH_YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").unwrap());
static DASH_YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap());
static SLASH_MD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})$").unwrap());
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\d{4}/)?(\d{1,2})/(\d{1,2})").unwrap());

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Convert a user- or log-supplied date fragment to zero-padded `MM/DD`.
///
/// Recognized, in order: `MMDD`, `M-D`, `YYYY/M/D`, `YYYY-M-D`, `M/D`.
/// Anything else (including out-of-range months or days) is returned
/// unchanged so callers can still fall back to substring matching.
pub fn normalize_date(fragment: &str) -> String {
    let s = fragment.trim();

    let patterns: [(&Regex, usize, usize); 5] = [
        (&*MMDD, 1, 2),
        (&*DASH_MD, 1, 2),
        (&*SLASH_YMD, 2, 3),
        (&*DASH_YMD, 2, 3),
        (&*SLASH_MD, 1, 2),
    ];

    let Some((month, day)) = patterns.iter().find_map(|(re, m, d)| {
        re.captures(s).map(|c| {
            (
                c.get(*m).map_or("", |x| x.as_str()),
                c.get(*d).map_or("", |x| x.as_str()),
            )
        })
    }) else {
        return fragment.to_string();
    };

    canonical_month_day(month, day).unwrap_or_else(|| fragment.to_string())
}

fn canonical_month_day(month: &str, day: &str) -> Option<String> {
    let m: u32 = month.parse().ok()?;
    let d: u32 = day.parse().ok()?;
    if !(1..=12).contains(&m) || !(1..=31).contains(&d) {
        return None;
    }
    Some(format!("{:02}/{:02}", m, d))
}

/// Every `M/D` or `YYYY/M/D` token inside `text`, normalized, in order.
pub fn extract_dates(text: &str) -> Vec<String> {
    DATE_TOKEN
        .captures_iter(text)
        .filter_map(|c| canonical_month_day(&c[1], &c[2]))
        .collect()
}

/// `M/D` without zero padding, as used in time-off labels.
pub fn month_day_label(d: &NaiveDate) -> String {
    format!("{}/{}", d.month(), d.day())
}

/// Inclusive window of `days` calendar days ending at `end`.
pub fn trailing_window(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = i64::from(days.max(1)) - 1;
    (end - Duration::days(span), end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_every_supported_spelling() {
        assert_eq!(normalize_date("04/03"), "04/03");
        assert_eq!(normalize_date("0403"), "04/03");
        assert_eq!(normalize_date("4-3"), "04/03");
        assert_eq!(normalize_date("2025/4/3"), "04/03");
        assert_eq!(normalize_date("2025-04-03"), "04/03");
        assert_eq!(normalize_date("4/3"), "04/03");
        assert_eq!(normalize_date(" 12/31 "), "12/31");
    }

    #[test]
    fn unrecognized_input_passes_through() {
        assert_eq!(normalize_date("2025"), "2025");
        assert_eq!(normalize_date("13/01"), "13/01");
        assert_eq!(normalize_date("Ming"), "Ming");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn extracts_dates_from_free_text() {
        assert_eq!(
            extract_dates("Ming (04/03 08:30), John (2025/4/10 9:00)"),
            vec!["04/03".to_string(), "04/10".to_string()]
        );
        assert!(extract_dates("no dates here 08:30").is_empty());
    }

    #[test]
    fn trailing_window_is_inclusive() {
        let end = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let (start, stop) = trailing_window(end, 7);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 4, 4).unwrap());
        assert_eq!(stop, end);
        assert_eq!(month_day_label(&start), "4/4");
    }
}
