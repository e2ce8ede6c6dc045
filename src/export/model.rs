use crate::core::search::DecodedEntry;
use serde::Serialize;

/// Flat row for exporting decoded audit entries.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DecodedExport {
    pub id: i64,
    pub created_at: String,
    pub actor_email: String,
    pub action: String,
    pub domain: String,
    pub booking_date: String,
    pub time: String,
    pub boat: String,
    pub member: String,
    pub coach: String,
    pub driver: String,
    pub activity_types: String,
    pub notes: String,
    pub filled_by: String,
    pub duration: String,
    pub change_summary: String,
    pub booking_list: String,
    pub total_count: String,
    pub raw_text: String,
}

impl From<&DecodedEntry> for DecodedExport {
    fn from(e: &DecodedEntry) -> Self {
        let d = &e.decoded;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        Self {
            id: e.entry.id,
            created_at: e.entry.created_at_str(),
            actor_email: text(&e.entry.actor_email),
            action: e.entry.action.to_db_str().to_string(),
            domain: e.entry.domain.to_db_str().to_string(),
            booking_date: text(&d.booking_date),
            time: text(&d.time),
            boat: text(&d.boat),
            member: text(&d.member),
            coach: text(&d.coach),
            driver: text(&d.driver),
            activity_types: text(&d.activity_types),
            notes: text(&d.notes),
            filled_by: text(&d.filled_by),
            duration: text(&d.duration),
            change_summary: text(&d.change_summary),
            booking_list: d
                .booking_list
                .as_ref()
                .map(|l| l.join(" | "))
                .unwrap_or_default(),
            total_count: d.total_count.map(|c| c.to_string()).unwrap_or_default(),
            raw_text: d.raw_text.clone(),
        }
    }
}
