//! Audit-line decoder.
//!
//! Each operation kind has its own grammar; a line is routed to one by its
//! leading keyword. Decoding is total: a part that does not match leaves its
//! field empty, and `raw_text` always carries the input unchanged.

mod batch;
mod brackets;
mod patterns;
mod single;

use crate::models::DecodedDetails;
use batch::BatchKind;
use single::SingleKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grammar {
    Single(SingleKind),
    Batch(BatchKind),
}

/// Leading keyword → grammar. Batch keywords come first so that no single
/// keyword can shadow them.
const DISPATCH: &[(&str, Grammar)] = &[
    ("批次修改", Grammar::Batch(BatchKind::Edit)),
    ("批次刪除", Grammar::Batch(BatchKind::Delete)),
    ("重複預約", Grammar::Batch(BatchKind::Repeat)),
    ("新增預約", Grammar::Single(SingleKind::Create)),
    ("修改預約", Grammar::Single(SingleKind::Update)),
    ("更新預約", Grammar::Single(SingleKind::Update)),
    ("刪除預約", Grammar::Single(SingleKind::Delete)),
    ("取消預約", Grammar::Single(SingleKind::Delete)),
];

impl Grammar {
    fn parse(self, raw: &str, body: &str) -> DecodedDetails {
        match self {
            Grammar::Single(kind) => {
                let body = body.trim_start().trim_start_matches([':', '：']);
                single::decode_single(raw, body, kind)
            }
            Grammar::Batch(kind) => batch::decode_batch(raw, body, kind),
        }
    }
}

/// Decode one audit line into its structured projection.
pub fn decode(details: &str) -> DecodedDetails {
    let line = details.trim_start();

    match DISPATCH.iter().find(|(prefix, _)| line.starts_with(prefix)) {
        Some((prefix, grammar)) => grammar.parse(details, &line[prefix.len()..]),
        None => unrecognized(details),
    }
}

fn unrecognized(details: &str) -> DecodedDetails {
    DecodedDetails {
        filled_by: patterns::find_filled_by(details),
        ..DecodedDetails::from_raw(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_prefix_keeps_only_raw_text() {
        let d = decode("排班調整：Papa教練 04/03");
        assert_eq!(d.raw_text, "排班調整：Papa教練 04/03");
        assert_eq!(d.coach, None);
        assert_eq!(d.booking_date, None);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let d = decode("  新增預約：04/03 08:30 G23 Ming");
        assert_eq!(d.boat.as_deref(), Some("G23"));
        assert_eq!(d.raw_text, "  新增預約：04/03 08:30 G23 Ming");
    }

    #[test]
    fn every_prefix_routes_somewhere() {
        for (prefix, _) in DISPATCH {
            let d = decode(prefix);
            assert_eq!(d.raw_text, *prefix);
        }
    }
}
