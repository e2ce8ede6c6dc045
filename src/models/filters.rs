use super::log_entry::{Action, Domain, LogEntry};
use chrono::NaiveDate;

/// Operation selector of the timeline screen.
///
/// `Schedule` is not an action: it selects the coach-assignment domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Schedule,
}

impl Operation {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "create" => Some(Operation::Create),
            "update" => Some(Operation::Update),
            "delete" => Some(Operation::Delete),
            "schedule" => Some(Operation::Schedule),
            _ => None,
        }
    }

    /// Action column value matched by this operation, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Operation::Create => Some(Action::Create),
            Operation::Update => Some(Action::Update),
            Operation::Delete => Some(Action::Delete),
            Operation::Schedule => None,
        }
    }

    /// Same selection as the log source applies, for rows already in memory.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self.action() {
            Some(action) => entry.action == action,
            None => entry.is_coach_assignment(),
        }
    }
}

/// "Filled by" selection: a concrete person, or entries nobody signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilledBySelection {
    Named(String),
    Unfilled,
}

impl FilledBySelection {
    /// Interpret user input; `sentinel` selects the unfilled bucket.
    pub fn parse(input: &str, sentinel: &str) -> Option<Self> {
        let value = input.trim();
        if value.is_empty() {
            None
        } else if value.eq_ignore_ascii_case(sentinel.trim()) {
            Some(FilledBySelection::Unfilled)
        } else {
            Some(FilledBySelection::Named(value.to_string()))
        }
    }
}

/// Predicates applied in memory over an already fetched snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub booking_date: Option<String>,
    pub filled_by: Option<FilledBySelection>,
    pub query: Option<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.booking_date.is_none() && self.filled_by.is_none() && self.query.is_none()
    }
}

/// Parameters handed to the log source for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub domains: Vec<Domain>,
    /// Inclusive local calendar dates.
    pub created_range: (NaiveDate, NaiveDate),
    pub operation: Option<Operation>,
    pub limit: usize,
}

impl LogQuery {
    pub fn new(created_range: (NaiveDate, NaiveDate), limit: usize) -> Self {
        Self {
            domains: Domain::all(),
            created_range,
            operation: None,
            limit,
        }
    }

    pub fn with_operation(mut self, operation: Option<Operation>) -> Self {
        self.operation = operation;
        self
    }

    /// Domains actually queried once the operation selector is applied.
    pub fn effective_domains(&self) -> Vec<Domain> {
        match self.operation {
            Some(Operation::Schedule) => self
                .domains
                .iter()
                .copied()
                .filter(|d| *d == Domain::CoachAssignment)
                .collect(),
            _ => self.domains.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_selects_unfilled() {
        assert_eq!(
            FilledBySelection::parse("NONE", "none"),
            Some(FilledBySelection::Unfilled)
        );
        assert_eq!(
            FilledBySelection::parse(" Amy ", "none"),
            Some(FilledBySelection::Named("Amy".into()))
        );
        assert_eq!(FilledBySelection::parse("  ", "none"), None);
    }

    #[test]
    fn schedule_narrows_domains() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
        let q = LogQuery::new((d, d), 500).with_operation(Some(Operation::Schedule));
        assert_eq!(q.effective_domains(), vec![Domain::CoachAssignment]);
        assert_eq!(Operation::Schedule.action(), None);
    }
}
