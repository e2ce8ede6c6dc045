//! Timestamp utilities: parsing user input, the UTC text form stored in the
//! database, and local day boundaries.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Storage form of `created_at`; lexicographic order equals time order.
const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse RFC 3339 or a local `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

pub fn to_stored(ts: &DateTime<Local>) -> String {
    ts.with_timezone(&Utc).format(STORED_FORMAT).to_string()
}

pub fn from_stored(s: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Stored-form bounds `[start, end)` covering the local days `first..=last`.
pub fn local_days_bounds(first: NaiveDate, last: NaiveDate) -> Option<(String, String)> {
    let start = local_midnight(first)?;
    let end = local_midnight(last.succ_opt()?)?;
    Some((to_stored(&start), to_stored(&end)))
}

fn local_midnight(d: NaiveDate) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&d.and_hms_opt(0, 0, 0)?).earliest()
}
