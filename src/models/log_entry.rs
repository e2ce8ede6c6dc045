use chrono::{DateTime, Local};
use serde::Serialize;

/// Coarse mutation category recorded next to every audit line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Action::from_db_str(&code.trim().to_lowercase())
    }
}

/// Which part of the booking system produced the line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Bookings,
    CoachAssignment,
}

impl Domain {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Domain::Bookings => "bookings",
            Domain::CoachAssignment => "coach_assignment",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "bookings" => Some(Domain::Bookings),
            "coach_assignment" => Some(Domain::CoachAssignment),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "booking" | "bookings" => Some(Domain::Bookings),
            "coach_assignment" | "schedule" => Some(Domain::CoachAssignment),
            _ => None,
        }
    }

    pub fn all() -> Vec<Domain> {
        vec![Domain::Bookings, Domain::CoachAssignment]
    }
}

/// One immutable audit row as handed over by the log source.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub created_at: Option<DateTime<Local>>,
    pub actor_email: Option<String>,
    pub action: Action,
    pub domain: Domain,
    /// Free text written by the booking system; the only decoder input.
    pub details: String,
}

impl LogEntry {
    pub fn is_coach_assignment(&self) -> bool {
        self.domain == Domain::CoachAssignment
    }

    /// Creation time formatted for listings, empty when unknown.
    pub fn created_at_str(&self) -> String {
        self.created_at
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_codes_are_case_insensitive() {
        assert_eq!(Action::from_code(" Update "), Some(Action::Update));
        assert_eq!(Action::from_code("schedule"), None);
    }

    #[test]
    fn domain_accepts_schedule_alias() {
        assert_eq!(Domain::from_code("schedule"), Some(Domain::CoachAssignment));
        assert_eq!(Domain::from_code("coach-assignment"), Some(Domain::CoachAssignment));
        assert_eq!(Domain::CoachAssignment.to_db_str(), "coach_assignment");
    }
}
