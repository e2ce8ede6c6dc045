//! Database row models for audit rows and time-off ranges.
//! These are thin wrappers around SQLite rows.

use crate::models::{Action, Domain};
use chrono::{DateTime, Local, NaiveDate};

/// Audit row about to be appended to `audit_log`.
#[derive(Debug, Clone)]
pub struct NewAuditRow {
    pub created_at: Option<DateTime<Local>>,
    pub actor_email: Option<String>,
    pub action: Action,
    pub domain: Domain,
    pub details: String,
}

/// Time-off range about to be appended to `coach_time_off`.
#[derive(Debug, Clone)]
pub struct NewTimeOff {
    pub coach_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}
