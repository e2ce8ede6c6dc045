//! Grammars for lines that describe one booking: create, update, delete.

use super::brackets::slot_fill;
use super::patterns::{self, DateTimeToken};
use crate::models::DecodedDetails;
use crate::utils::date::normalize_date;
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SingleKind {
    Create,
    Update,
    Delete,
}

/// Field labels of the update change clause and the tag each contributes.
const CHANGE_LABELS: &[(&str, &str)] = &[
    ("時間", "時間"),
    ("船", "船"),
    ("教練", "教練"),
    ("駕駛", "駕駛"),
    ("聯絡人", "聯絡人"),
    ("備註", "備註"),
    ("時長", "時長"),
    ("活動", "活動"),
];

static CHANGE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[，,]\s*變更").unwrap());
static CHANGE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"變更\s*[:：]?\s*(.*)$").unwrap());
static BOAT_CHANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"船\s*[:：]?\s*[^→、,，]*?\s*(?:→|->)\s*([^、,，\s)）(（]+)").unwrap()
});
static CONTACT_CHANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"聯絡人\s*[:：]?\s*[^→、,，]*?\s*(?:→|->)\s*([^、,，\s)）(（]+)").unwrap()
});

pub(super) fn decode_single(raw: &str, body: &str, kind: SingleKind) -> DecodedDetails {
    let mut out = DecodedDetails::from_raw(raw);

    let time = patterns::find_date_time(body);
    if let Some(t) = &time {
        out.time = Some(t.text.clone());
        out.booking_date = Some(normalize_date(&t.month_day));
    }
    // brackets and the update change clause may mention other durations
    let head_end = [
        patterns::first_bracket_start(body),
        CHANGE_CLAUSE.find(body).map(|m| m.start()),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(body.len());
    out.duration = patterns::find_duration(&body[..head_end]);

    let contents: Vec<String> = patterns::bracket_groups(body)
        .into_iter()
        .map(|(_, inner)| inner)
        .collect();
    slot_fill(&contents, &mut out);

    match kind {
        SingleKind::Create => fill_create(body, &mut out),
        SingleKind::Update => fill_update(body, time.as_ref(), &mut out),
        SingleKind::Delete => fill_delete(body, &mut out),
    }

    out.filled_by = patterns::find_filled_by(body);
    out
}

fn fill_create(body: &str, out: &mut DecodedDetails) {
    let rest = patterns::strip_annotations(body);

    match rest.split_once('|') {
        Some((head, tail)) => {
            let (boat, member) = patterns::split_boat_member(head);
            out.boat = boat;
            out.member = member;
            out.coach = patterns::join_names(patterns::coach_names(tail));
        }
        None => fill_without_pipe(&rest, out),
    }
}

/// Coach tokens are taken out first; what remains is boat and member.
pub(super) fn fill_without_pipe(rest: &str, out: &mut DecodedDetails) {
    out.coach = patterns::join_names(patterns::coach_names(rest));
    let (boat, member) = patterns::split_boat_member(&patterns::remove_coaches(rest));
    out.boat = boat;
    out.member = member;
}

fn fill_update(body: &str, time: Option<&DateTimeToken>, out: &mut DecodedDetails) {
    let marker = CHANGE_MARKER.find(body);

    if let Some(m) = marker {
        let from = time.map_or(0, |t| t.span.end);
        if from <= m.start() {
            out.member = patterns::non_empty(&body[from..m.start()]);
        }
    }

    let Some(clause) = CHANGE_CLAUSE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return;
    };
    let clause = match patterns::filled_by_start(clause) {
        Some(end) => &clause[..end],
        None => clause,
    };

    let tags: Vec<&str> = CHANGE_LABELS
        .iter()
        .filter(|(label, _)| clause.contains(label))
        .map(|(_, tag)| *tag)
        .collect();
    if !tags.is_empty() {
        out.change_summary = Some(tags.join("、"));
    }

    if let Some(new_boat) = BOAT_CHANGE.captures(clause).and_then(|c| c.get(1)) {
        out.boat = patterns::non_empty(new_boat.as_str());
    }
    if let Some(new_contact) = CONTACT_CHANGE.captures(clause).and_then(|c| c.get(1)) {
        out.member = patterns::non_empty(new_contact.as_str());
    }
}

fn fill_delete(body: &str, out: &mut DecodedDetails) {
    let rest = patterns::strip_annotations(body);

    match rest.split_once('|') {
        Some((head, tail)) => {
            let (boat, member) = patterns::split_boat_member(head);
            out.boat = boat;
            out.member = member;
            fill_crew(tail, out);
        }
        None => fill_without_pipe(&rest, out),
    }
}

/// `|`-separated crew parts: driver segments or coach tokens.
pub(super) fn fill_crew(tail: &str, out: &mut DecodedDetails) {
    let mut coaches = Vec::new();
    let mut drivers = Vec::new();

    for part in tail.split('|').map(str::trim).filter(|p| !p.is_empty()) {
        match patterns::driver_name(part) {
            Some(driver) => drivers.push(driver),
            None => coaches.extend(patterns::coach_names(part)),
        }
    }

    out.coach = patterns::join_names(coaches);
    out.driver = patterns::join_names(drivers);
}
