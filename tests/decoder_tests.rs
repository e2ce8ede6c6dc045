use bookinglog::core::decoder::decode;
use bookinglog::models::DecodedDetails;
use bookinglog::normalize_date;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn create_line_with_annotation_bracket() {
    let d = decode("新增預約：04/03 08:30 G23 Ming | Papa教練 [WB+WS] [課堂人：L]");

    assert_eq!(d.time.as_deref(), Some("04/03 08:30"));
    assert_eq!(d.booking_date.as_deref(), Some("04/03"));
    assert_eq!(d.boat.as_deref(), Some("G23"));
    assert_eq!(d.member.as_deref(), Some("Ming"));
    assert_eq!(d.coach.as_deref(), Some("Papa"));
    assert_eq!(d.activity_types.as_deref(), Some("WB+WS"));
    assert_eq!(d.filled_by, None);
    assert_eq!(d.notes, None);
}

#[test]
fn batch_line_keeps_preview_and_true_count() {
    let d = decode("批次修改 8 筆：時長→90分鐘 [Ming (04/03 08:30), John (04/03 09:00) 等8筆]");

    assert_eq!(d.total_count, Some(8));
    assert_eq!(
        d.booking_list,
        Some(vec![
            "Ming (04/03 08:30)".to_string(),
            "John (04/03 09:00)".to_string()
        ])
    );
    assert_eq!(d.booking_date.as_deref(), Some("04/03"));
    assert!(d.change_summary.unwrap().contains("時長→90分鐘"));
}

#[test]
fn update_line_collects_change_tags_and_new_values() {
    let d = decode("修改預約：04/03 08:30 Ming，變更：船 G23→G25、聯絡人 Ming→John (填表人: Amy)");

    assert_eq!(d.time.as_deref(), Some("04/03 08:30"));
    assert_eq!(d.change_summary.as_deref(), Some("船、聯絡人"));
    assert_eq!(d.boat.as_deref(), Some("G25"));
    assert_eq!(d.member.as_deref(), Some("John"));
    assert_eq!(d.filled_by.as_deref(), Some("Amy"));
}

#[test]
fn update_line_without_arrows_keeps_member() {
    let d = decode("修改預約：04/03 08:30 Ming，變更：時間、時長");
    assert_eq!(d.member.as_deref(), Some("Ming"));
    assert_eq!(d.change_summary.as_deref(), Some("時間、時長"));
    assert_eq!(d.boat, None);
}

#[test]
fn delete_line_splits_coach_and_driver() {
    let d = decode("刪除預約：04/03 10:00 G23 Ming | Papa教練 | 🚤 Tom");

    assert_eq!(d.boat.as_deref(), Some("G23"));
    assert_eq!(d.member.as_deref(), Some("Ming"));
    assert_eq!(d.coach.as_deref(), Some("Papa"));
    assert_eq!(d.driver.as_deref(), Some("Tom"));
    assert_eq!(d.booking_date.as_deref(), Some("04/03"));
}

#[test]
fn repeat_line_reads_booking_and_dates() {
    let d = decode("重複預約 3 筆：G23 60分 Ming | Papa教練 [04/03 08:30, 04/10 08:30, 04/17 08:30]");

    assert_eq!(d.boat.as_deref(), Some("G23"));
    assert_eq!(d.member.as_deref(), Some("Ming"));
    assert_eq!(d.coach.as_deref(), Some("Papa"));
    assert_eq!(d.duration.as_deref(), Some("60分"));
    assert_eq!(d.total_count, Some(3));
    assert_eq!(d.booking_list.as_ref().map(Vec::len), Some(3));
    assert_eq!(d.booking_date.as_deref(), Some("04/03"));
}

#[test]
fn duration_ignores_bracket_text() {
    let d = decode("新增預約：04/03 08:30 G23 Ming | Papa教練 [WB] [晚到10分鐘]");
    assert_eq!(d.duration, None);
    assert_eq!(d.notes.as_deref(), Some("晚到10分鐘"));

    let d = decode("新增預約：04/03 08:30 60分 G23 Ming | Papa教練 [WB] [晚到10分鐘]");
    assert_eq!(d.duration.as_deref(), Some("60分"));
    assert_eq!(d.boat.as_deref(), Some("G23"));
}

#[test]
fn update_duration_change_is_not_the_duration() {
    let d = decode("修改預約：04/03 08:30 Ming，變更：時長 60分→90分");

    assert_eq!(d.member.as_deref(), Some("Ming"));
    assert_eq!(d.duration, None);
    assert!(d.change_summary.is_some());
}

#[test]
fn legacy_brackets_with_labels() {
    let d = decode("新增預約：2025/4/3 8:30 G23 Ming | Papa教練 【活動: WB】【備註: 晚到】");

    assert_eq!(d.time.as_deref(), Some("2025/4/3 8:30"));
    assert_eq!(d.booking_date.as_deref(), Some("04/03"));
    assert_eq!(d.activity_types.as_deref(), Some("WB"));
    assert_eq!(d.notes.as_deref(), Some("晚到"));
}

#[test]
fn unrecognized_line_keeps_raw_text_and_filled_by() {
    let raw = "系統同步完成 (填表人: Amy)";
    let d = decode(raw);
    assert_eq!(
        d,
        DecodedDetails {
            filled_by: Some("Amy".into()),
            ..DecodedDetails::from_raw(raw)
        }
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("[")]
#[case("】【")]
#[case("新增預約")]
#[case("新增預約：[[[WB]]")]
#[case("修改預約：，變更")]
#[case("批次刪除 筆：[")]
#[case("重複預約 99999999999999999999999 筆：[1/1]")]
#[case("刪除預約：| | |")]
#[case("新增預約：13/45 99:99 (填表人:)")]
fn decode_is_total_and_pure(#[case] raw: &str) {
    let first = decode(raw);
    let second = decode(raw);
    assert_eq!(first, second);
    assert_eq!(first.raw_text, raw);
}

#[rstest]
#[case("04/03", "04/03")]
#[case("0403", "04/03")]
#[case("2025/4/3", "04/03")]
#[case("4-3", "04/03")]
#[case("2025-04-03", "04/03")]
#[case("4/3", "04/03")]
#[case("13/40", "13/40")]
#[case("tomorrow", "tomorrow")]
fn normalizes_date_fragments(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_date(input), expected);
}
