use chrono::NaiveDate;
use serde::Serialize;

/// A coach's declared unavailability window (inclusive on both ends).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TimeOffRange {
    pub id: i64,
    pub coach_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

impl TimeOffRange {
    /// Reason with blank values folded into `None`.
    pub fn reason_key(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// One or more consecutive source ranges collapsed for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MergedTimeOffRange {
    #[serde(flatten)]
    pub range: TimeOffRange,
    pub display_text: String,
    pub merged_ids: Vec<i64>,
}
