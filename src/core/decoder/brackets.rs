//! Slot-fill for the bracket groups of single-booking lines.
//!
//! Older lines label their brackets (`[活動: WB]`, `[備註: ...]`); newer lines
//! write them bare, so an unlabeled group is classified by shape. The order
//! below decides which field wins when both readings are possible and must not
//! change, or historical lines would be reclassified.

use super::patterns::non_empty;
use crate::models::DecodedDetails;
use regex::Regex;
use std::sync::LazyLock;

const ACTIVITY_CODES: &[&str] = &["WB", "WS", "WK", "SK", "KB", "TB", "JS", "SP"];

static ACTIVITY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:活動類型|活動)\s*[:：]\s*(.*)$").unwrap());
static NOTES_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^備註\s*[:：]\s*(.*)$").unwrap());
static FILLED_BY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:填表人|課堂人)\s*[:：]").unwrap());

#[derive(Debug, PartialEq, Eq)]
enum Slot<'a> {
    Activity(&'a str),
    Notes(&'a str),
    /// Filled-by annotation written inside a bracket; never a slot value.
    Annotation,
    Unlabeled(&'a str),
}

fn classify(inner: &str) -> Slot<'_> {
    if let Some(m) = ACTIVITY_LABEL.captures(inner).and_then(|c| c.get(1)) {
        Slot::Activity(m.as_str())
    } else if let Some(m) = NOTES_LABEL.captures(inner).and_then(|c| c.get(1)) {
        Slot::Notes(m.as_str())
    } else if FILLED_BY_LABEL.is_match(inner) {
        Slot::Annotation
    } else {
        Slot::Unlabeled(inner)
    }
}

/// `+`-joined combos, or a bare known code such as `WB` / `WS+...`.
fn looks_like_activity(inner: &str) -> bool {
    if inner.contains('+') {
        return true;
    }
    ACTIVITY_CODES.iter().any(|code| {
        inner
            .get(..code.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(code))
            && inner
                .get(code.len()..)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('+'))
    })
}

/// Assign `activity_types` and `notes` from bracket contents.
pub(super) fn slot_fill(contents: &[String], out: &mut DecodedDetails) {
    let mut unlabeled: Vec<&str> = Vec::new();

    for inner in contents.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match classify(inner) {
            Slot::Activity(v) => {
                if out.activity_types.is_none() {
                    out.activity_types = non_empty(v);
                }
            }
            Slot::Notes(v) => {
                if out.notes.is_none() {
                    out.notes = non_empty(v);
                }
            }
            Slot::Annotation => {}
            Slot::Unlabeled(v) => unlabeled.push(v),
        }
    }

    let mut used = vec![false; unlabeled.len()];

    if out.activity_types.is_none() {
        let pick = unlabeled
            .iter()
            .position(|c| looks_like_activity(c))
            .or(if unlabeled.is_empty() { None } else { Some(0) });
        if let Some(i) = pick {
            out.activity_types = non_empty(unlabeled[i]);
            used[i] = true;
        }
    }

    if out.notes.is_none()
        && let Some(i) = used.iter().position(|u| !u)
    {
        out.notes = non_empty(unlabeled[i]);
    }
}
