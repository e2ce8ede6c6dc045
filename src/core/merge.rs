//! Collapse back-to-back time-off ranges that share a reason.

use crate::models::{MergedTimeOffRange, TimeOffRange};
use crate::utils::date::month_day_label;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Largest gap, in days, between one range's end and the next one's start
/// that still counts as consecutive.
const MAX_GAP_DAYS: i64 = 1;

struct Group<'a> {
    first: &'a TimeOffRange,
    max_end: NaiveDate,
    ids: Vec<i64>,
}

impl<'a> Group<'a> {
    fn start(range: &'a TimeOffRange) -> Self {
        Self {
            first: range,
            max_end: range.end_date,
            ids: vec![range.id],
        }
    }

    fn accepts(&self, next: &TimeOffRange) -> bool {
        next.coach_id == self.first.coach_id
            && next.reason_key() == self.first.reason_key()
            && (next.start_date - self.max_end).num_days() <= MAX_GAP_DAYS
    }

    fn absorb(&mut self, next: &TimeOffRange) {
        self.max_end = self.max_end.max(next.end_date);
        self.ids.push(next.id);
    }

    fn close(self) -> MergedTimeOffRange {
        let start = self.first.start_date;
        let display_text = if start == self.max_end {
            month_day_label(&start)
        } else {
            format!("{} - {}", month_day_label(&start), month_day_label(&self.max_end))
        };

        MergedTimeOffRange {
            range: TimeOffRange {
                end_date: self.max_end,
                ..self.first.clone()
            },
            display_text,
            merged_ids: self.ids,
        }
    }
}

/// Merge the ranges of one coach, oldest first.
pub fn merge_ranges(ranges: &[TimeOffRange]) -> Vec<MergedTimeOffRange> {
    let mut sorted: Vec<&TimeOffRange> = ranges.iter().collect();
    sorted.sort_by_key(|r| r.start_date);

    let mut out = Vec::new();
    let mut current: Option<Group> = None;

    for range in sorted {
        match current.as_mut() {
            Some(group) if group.accepts(range) => group.absorb(range),
            _ => {
                if let Some(done) = current.replace(Group::start(range)) {
                    out.push(done.close());
                }
            }
        }
    }

    if let Some(done) = current {
        out.push(done.close());
    }

    out
}

/// Partition a mixed list by coach id and merge each coach separately.
pub fn merge_ranges_by_coach(ranges: &[TimeOffRange]) -> BTreeMap<String, Vec<MergedTimeOffRange>> {
    let mut by_coach: BTreeMap<String, Vec<TimeOffRange>> = BTreeMap::new();
    for r in ranges {
        by_coach.entry(r.coach_id.clone()).or_default().push(r.clone());
    }

    by_coach
        .into_iter()
        .map(|(coach, list)| {
            let merged = merge_ranges(&list);
            (coach, merged)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(id: i64, start: (u32, u32), end: (u32, u32), reason: Option<&str>) -> TimeOffRange {
        TimeOffRange {
            id,
            coach_id: "papa".into(),
            start_date: NaiveDate::from_ymd_opt(2025, start.0, start.1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, end.0, end.1).unwrap(),
            reason: reason.map(String::from),
        }
    }

    #[test]
    fn adjacent_ranges_with_same_reason_merge() {
        let merged = merge_ranges(&[
            range(2, (3, 11), (3, 12), Some("休假")),
            range(1, (3, 10), (3, 10), Some("休假")),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].display_text, "3/10 - 3/12");
        assert_eq!(merged[0].range.id, 1);
        assert_eq!(merged[0].merged_ids, vec![1, 2]);
    }

    #[test]
    fn different_reasons_stay_apart() {
        let merged = merge_ranges(&[
            range(1, (3, 10), (3, 10), Some("休假")),
            range(2, (3, 11), (3, 12), Some("比賽")),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].display_text, "3/10");
        assert_eq!(merged[1].display_text, "3/11 - 3/12");
    }

    #[test]
    fn gap_larger_than_one_day_splits() {
        let merged = merge_ranges(&[
            range(1, (3, 10), (3, 10), None),
            range(2, (3, 12), (3, 12), None),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn blank_reason_equals_absent_reason() {
        let merged = merge_ranges(&[
            range(1, (3, 10), (3, 10), None),
            range(2, (3, 11), (3, 11), Some("  ")),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].display_text, "3/10 - 3/11");
    }

    #[test]
    fn overlapping_range_keeps_max_end() {
        let merged = merge_ranges(&[
            range(1, (3, 10), (3, 20), None),
            range(2, (3, 12), (3, 13), None),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].range.end_date, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
    }

    #[test]
    fn coaches_never_merge_with_each_other() {
        let mut other = range(2, (3, 11), (3, 11), None);
        other.coach_id = "bob".into();
        let by_coach = merge_ranges_by_coach(&[range(1, (3, 10), (3, 10), None), other]);
        assert_eq!(by_coach.len(), 2);
        assert_eq!(by_coach["bob"][0].display_text, "3/11");
        assert_eq!(by_coach["papa"][0].display_text, "3/10");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(merge_ranges(&[]).is_empty());
    }
}
