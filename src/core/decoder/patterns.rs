//! Token patterns shared by every grammar of the audit-line decoder.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `[...]` is the current bracket convention, `【...】` the legacy one.
static BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]|【([^【】]*)】").unwrap());

static FILLED_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[(（]\s*(?:填表人|課堂人)\s*[:：]\s*([^)）]*?)\s*[)）]").unwrap()
});

/// Long `YYYY/M/D H:MM` or short `M/D H:MM`; group 1 is the `M/D` part.
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{4}/)?(\d{1,2}/\d{1,2})\s+\d{1,2}:\d{2}").unwrap()
});

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*分(?:鐘)?").unwrap());

static COACH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\s、,，/|:：()（）]+?)\s*(?:教練|老師)").unwrap()
});

static DRIVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:駕駛\s*[:：]\s*(.+)|(.+?)\s*駕駛\s*[:：]?)$").unwrap()
});

static COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*筆").unwrap());

static DATE_OR_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}/\d{1,2}|\d{1,2}:\d{2}").unwrap());

static MORE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s*(?:\.{3}|…)?\s*(?:等\s*\d+\s*筆|及其他\s*\d+\s*筆|and\s+\d+\s+more)\s*$",
    )
    .unwrap()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading vehicle glyphs that mark a driver segment.
const VEHICLE_GLYPHS: &[char] = &['🚤', '🛥', '⛵', '🚗'];

/// Trimmed copy of `s`, or `None` when nothing is left.
pub(super) fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Collapse whitespace runs and trim.
pub(super) fn squeeze(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Bracket groups in order of appearance: byte span and inner text.
pub(super) fn bracket_groups(text: &str) -> Vec<(Range<usize>, String)> {
    BRACKET
        .captures_iter(text)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let inner = c.get(1).or_else(|| c.get(2))?;
            Some((whole.range(), inner.as_str().trim().to_string()))
        })
        .collect()
}

pub(super) fn first_bracket_start(text: &str) -> Option<usize> {
    BRACKET.find(text).map(|m| m.start())
}

pub(super) fn find_filled_by(text: &str) -> Option<String> {
    FILLED_BY
        .captures_iter(text)
        .last()
        .and_then(|c| c.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

pub(super) fn filled_by_start(text: &str) -> Option<usize> {
    FILLED_BY.find(text).map(|m| m.start())
}

/// A located date-time token.
pub(super) struct DateTimeToken {
    pub text: String,
    pub month_day: String,
    pub span: Range<usize>,
}

pub(super) fn find_date_time(text: &str) -> Option<DateTimeToken> {
    let c = DATE_TIME.captures(text)?;
    let whole = c.get(0)?;
    let md = c.get(1)?;
    Some(DateTimeToken {
        text: whole.as_str().to_string(),
        month_day: md.as_str().to_string(),
        span: whole.range(),
    })
}

/// Duration token rendered as `N分`.
pub(super) fn find_duration(text: &str) -> Option<String> {
    DURATION.captures(text).map(|c| format!("{}分", &c[1]))
}

pub(super) fn remove_duration(text: &str) -> String {
    DURATION.replace_all(text, " ").into_owned()
}

/// Text left once the date-time, duration, bracket groups and filled-by
/// parenthetical are removed.
pub(super) fn strip_annotations(text: &str) -> String {
    let s = FILLED_BY.replace_all(text, " ");
    let s = BRACKET.replace_all(&s, " ");
    let s = DATE_TIME.replace_all(&s, " ");
    let s = DURATION.replace_all(&s, " ");
    squeeze(&s)
}

/// Names in `<name>教練` / `<name>老師` tokens, in order.
pub(super) fn coach_names(text: &str) -> Vec<String> {
    COACH
        .captures_iter(text)
        .filter_map(|c| c.get(1).and_then(|m| non_empty(m.as_str())))
        .collect()
}

pub(super) fn remove_coaches(text: &str) -> String {
    squeeze(&COACH.replace_all(text, " "))
}

/// Driver name when `part` is a driver segment (`🚤 Tom`, `Tom駕駛`,
/// `駕駛: Tom`).
pub(super) fn driver_name(part: &str) -> Option<String> {
    let p = part.trim();
    if p.starts_with(VEHICLE_GLYPHS) {
        let name = p
            .trim_start_matches(VEHICLE_GLYPHS)
            .trim_start_matches('\u{FE0F}')
            .trim_start()
            .trim_start_matches([':', '：']);
        return non_empty(name);
    }
    let c = DRIVER.captures(p)?;
    c.get(1)
        .or_else(|| c.get(2))
        .and_then(|m| non_empty(m.as_str()))
}

/// Split on the first whitespace into (boat, member).
pub(super) fn split_boat_member(text: &str) -> (Option<String>, Option<String>) {
    let t = squeeze(text);
    match t.split_once(' ') {
        Some((boat, member)) => (non_empty(boat), non_empty(member)),
        None => (non_empty(&t), None),
    }
}

/// Leading `N 筆` count and the byte offset right after it.
pub(super) fn find_count(text: &str) -> Option<(usize, usize)> {
    let c = COUNT.captures(text)?;
    let n = c[1].parse().ok()?;
    Some((n, c.get(0)?.end()))
}

pub(super) fn has_date_or_time(text: &str) -> bool {
    DATE_OR_TIME.is_match(text)
}

pub(super) fn strip_more_suffix(text: &str) -> String {
    MORE_SUFFIX.replace(text, "").into_owned()
}

pub(super) fn join_names(names: Vec<String>) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_both_date_time_spellings() {
        let short = find_date_time("x 04/03 08:30 y").unwrap();
        assert_eq!(short.text, "04/03 08:30");
        assert_eq!(short.month_day, "04/03");

        let long = find_date_time("2025/4/3 8:30 G23").unwrap();
        assert_eq!(long.text, "2025/4/3 8:30");
        assert_eq!(long.month_day, "4/3");
    }

    #[test]
    fn recognizes_legacy_and_current_brackets() {
        let groups = bracket_groups("a [WB+WS] b 【備註: 晚到】");
        let inner: Vec<&str> = groups.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(inner, vec!["WB+WS", "備註: 晚到"]);
    }

    #[test]
    fn driver_segments() {
        assert_eq!(driver_name("🚤 Tom").as_deref(), Some("Tom"));
        assert_eq!(driver_name("Tom駕駛").as_deref(), Some("Tom"));
        assert_eq!(driver_name("駕駛: Tom").as_deref(), Some("Tom"));
        assert_eq!(driver_name("Papa教練"), None);
    }

    #[test]
    fn coach_tokens_in_order() {
        assert_eq!(
            coach_names("Papa教練、Bob老師 / Kim教練"),
            vec!["Papa".to_string(), "Bob".to_string(), "Kim".to_string()]
        );
        assert_eq!(remove_coaches("G23 Ming Papa教練"), "G23 Ming");
    }

    #[test]
    fn filled_by_accepts_both_labels() {
        assert_eq!(find_filled_by("x (填表人: Amy)").as_deref(), Some("Amy"));
        assert_eq!(find_filled_by("x （課堂人：L）").as_deref(), Some("L"));
        assert_eq!(find_filled_by("x [課堂人：L]"), None);
    }
}
