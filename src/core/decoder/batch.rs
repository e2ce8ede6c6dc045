//! Grammars for lines that summarize several bookings: batch edit, batch
//! delete and repeat booking.

use super::patterns;
use super::single::{fill_crew, fill_without_pipe};
use crate::models::DecodedDetails;
use crate::utils::date::extract_dates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BatchKind {
    Edit,
    Delete,
    Repeat,
}

pub(super) fn decode_batch(raw: &str, body: &str, kind: BatchKind) -> DecodedDetails {
    let mut out = DecodedDetails::from_raw(raw);

    // The count sits before the list; `等8筆` inside the list is not it.
    let head_end = patterns::first_bracket_start(body).unwrap_or(body.len());
    let count = patterns::find_count(&body[..head_end]);
    let clause_start = count.map_or(0, |(_, end)| end);
    let middle = middle_clause(&body[clause_start..]);

    match kind {
        BatchKind::Repeat => fill_repeat(middle, &mut out),
        BatchKind::Edit | BatchKind::Delete => {
            out.change_summary = patterns::non_empty(middle);
        }
    }

    out.booking_list = booking_list(body);
    if let Some(list) = &out.booking_list {
        out.booking_date = list
            .iter()
            .find_map(|item| extract_dates(item).into_iter().next());
    }

    let listed = out.booking_list.as_ref().map_or(0, Vec::len);
    out.total_count = match count {
        Some((n, _)) => Some(n.max(listed)),
        None if listed > 0 => Some(listed),
        None => None,
    };

    out.filled_by = patterns::find_filled_by(body);
    out
}

/// Text between the count marker and the first bracket (or filled-by
/// parenthetical), without the leading colon.
fn middle_clause(after_count: &str) -> &str {
    let end = [
        patterns::first_bracket_start(after_count),
        patterns::filled_by_start(after_count),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(after_count.len());

    after_count[..end]
        .trim()
        .trim_start_matches([':', '：'])
        .trim()
}

/// `G23 60分 Ming | Papa教練 | Bob教練`
fn fill_repeat(clause: &str, out: &mut DecodedDetails) {
    if clause.is_empty() {
        return;
    }
    out.duration = patterns::find_duration(clause);
    let without_duration = patterns::remove_duration(clause);

    match without_duration.split_once('|') {
        Some((head, tail)) => {
            let (boat, member) = patterns::split_boat_member(head);
            out.boat = boat;
            out.member = member;
            fill_crew(tail, out);
        }
        None => fill_without_pipe(&patterns::squeeze(&without_duration), out),
    }
}

/// The last bracket group, when it holds dates or times, split into entries.
fn booking_list(body: &str) -> Option<Vec<String>> {
    let (_, inner) = patterns::bracket_groups(body).pop()?;
    if !patterns::has_date_or_time(&inner) {
        return None;
    }

    let items: Vec<String> = patterns::strip_more_suffix(&inner)
        .split([',', '，'])
        .filter_map(patterns::non_empty)
        .collect();

    if items.is_empty() { None } else { Some(items) }
}
