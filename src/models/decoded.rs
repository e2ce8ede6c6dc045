use serde::Serialize;

/// Structured projection recovered from one audit line.
///
/// Every field except `raw_text` is best effort: a pattern that does not match
/// leaves its field as `None`. Values are recomputed on every read and never
/// stored.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DecodedDetails {
    pub member: Option<String>,
    pub boat: Option<String>,
    pub coach: Option<String>,
    pub driver: Option<String>,
    /// Date-time token exactly as written in the line.
    pub time: Option<String>,
    /// Canonical `MM/DD`.
    pub booking_date: Option<String>,
    pub duration: Option<String>,
    pub activity_types: Option<String>,
    pub notes: Option<String>,
    pub change_summary: Option<String>,
    /// Person who filled in the form, distinct from the actor account.
    pub filled_by: Option<String>,
    pub booking_list: Option<Vec<String>>,
    /// True size of a batch; may exceed `booking_list.len()` when the line
    /// only previews the first few bookings.
    pub total_count: Option<usize>,
    pub raw_text: String,
}

impl DecodedDetails {
    pub fn from_raw(raw: &str) -> Self {
        Self {
            raw_text: raw.to_string(),
            ..Default::default()
        }
    }

    /// Decoded fields searched by the free-text query, in display order.
    pub fn searchable_fields(&self) -> [Option<&str>; 8] {
        [
            self.filled_by.as_deref(),
            self.member.as_deref(),
            self.boat.as_deref(),
            self.time.as_deref(),
            self.coach.as_deref(),
            self.driver.as_deref(),
            self.activity_types.as_deref(),
            self.notes.as_deref(),
        ]
    }
}
