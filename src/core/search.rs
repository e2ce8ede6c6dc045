//! In-memory filter and day grouping over a fetched audit snapshot.
//!
//! The pipeline is recomputed from scratch on every filter change: decode,
//! booking-date filter, filled-by filter, free-text query, then grouping by
//! the calendar day of `created_at`.

use crate::core::decoder::decode;
use crate::models::{DecodedDetails, FilledBySelection, FilterSet, LogEntry};
use crate::utils::date::{extract_dates, normalize_date};
use chrono::NaiveDate;
use serde::Serialize;

/// An entry together with its decoded projection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DecodedEntry {
    pub entry: LogEntry,
    pub decoded: DecodedDetails,
}

impl DecodedEntry {
    pub fn new(entry: LogEntry) -> Self {
        let decoded = decode(&entry.details);
        Self { entry, decoded }
    }
}

/// Entries created on the same local calendar day. `date` is `None` for
/// entries without a creation time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayGroup {
    pub date: Option<NaiveDate>,
    pub entries: Vec<DecodedEntry>,
}

fn matches_booking_date(item: &DecodedEntry, normalized: &str, original: &str) -> bool {
    if item.entry.is_coach_assignment() {
        return false;
    }

    let d = &item.decoded;
    d.booking_date
        .as_deref()
        .is_some_and(|bd| bd.contains(normalized))
        || d.booking_list.as_ref().is_some_and(|list| {
            list.iter()
                .flat_map(|it| extract_dates(it))
                .any(|date| date.contains(normalized))
        })
        || item.entry.details.contains(normalized)
        || (!original.is_empty() && item.entry.details.contains(original))
}

fn matches_filled_by(item: &DecodedEntry, selection: &FilledBySelection) -> bool {
    match selection {
        FilledBySelection::Unfilled => item.decoded.filled_by.is_none(),
        FilledBySelection::Named(name) => {
            !item.entry.is_coach_assignment()
                && item.decoded.filled_by.as_deref() == Some(name.as_str())
        }
    }
}

fn matches_query(item: &DecodedEntry, needle_lower: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle_lower);

    hit(item.entry.details.as_str())
        || item.entry.actor_email.as_deref().is_some_and(hit)
        || item
            .decoded
            .searchable_fields()
            .into_iter()
            .flatten()
            .any(hit)
}

/// Decode every entry and keep those passing all active filters, in input
/// order.
pub fn filter_entries(entries: &[LogEntry], filters: &FilterSet) -> Vec<DecodedEntry> {
    let date_filter = filters
        .booking_date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| (normalize_date(d), d.to_string()));

    let query = filters
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    entries
        .iter()
        .cloned()
        .map(DecodedEntry::new)
        .filter(|item| {
            date_filter
                .as_ref()
                .is_none_or(|(norm, orig)| matches_booking_date(item, norm, orig))
        })
        .filter(|item| {
            filters
                .filled_by
                .as_ref()
                .is_none_or(|sel| matches_filled_by(item, sel))
        })
        .filter(|item| query.as_deref().is_none_or(|q| matches_query(item, q)))
        .collect()
}

/// Group already filtered entries by creation day, newest day first.
/// Within a day the incoming order is kept.
pub fn group_by_day(items: Vec<DecodedEntry>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for item in items {
        let day = item.entry.created_at.map(|ts| ts.date_naive());
        match groups.iter_mut().find(|g| g.date == day) {
            Some(group) => group.entries.push(item),
            None => groups.push(DayGroup {
                date: day,
                entries: vec![item],
            }),
        }
    }

    // `None` sorts below every date, so descending order puts it last.
    groups.sort_by(|a, b| b.date.cmp(&a.date));

    groups
}

/// Full pipeline: decode, filter, group.
pub fn filter_and_group(entries: &[LogEntry], filters: &FilterSet) -> Vec<DayGroup> {
    group_by_day(filter_entries(entries, filters))
}
