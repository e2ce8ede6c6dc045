use crate::core::session::LogSource;
use crate::db::models::{NewAuditRow, NewTimeOff};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Action, Domain, LogEntry, LogQuery, TimeOffRange};
use crate::utils::time::{from_stored, local_days_bounds, to_stored};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, Result, Row, params, params_from_iter};

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

/// Append one audit row; returns its id.
pub fn insert_entry(conn: &Connection, row: &NewAuditRow) -> AppResult<i64> {
    let created_at = row.created_at.as_ref().map(to_stored);

    conn.execute(
        "INSERT INTO audit_log (created_at, actor_email, action, domain, details)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            created_at,
            row.actor_email,
            row.action.to_db_str(),
            row.domain.to_db_str(),
            row.details,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Audit rows created on the local days of `query.created_range`, newest
/// first, capped at `query.limit`.
pub fn fetch_entries(conn: &Connection, query: &LogQuery) -> AppResult<Vec<LogEntry>> {
    let (first, last) = query.created_range;
    if first > last {
        return Err(AppError::InvalidRange(format!("{} > {}", first, last)));
    }

    let domains = query.effective_domains();
    if domains.is_empty() || query.limit == 0 {
        return Ok(Vec::new());
    }

    let (start, end) = local_days_bounds(first, last)
        .ok_or_else(|| AppError::InvalidRange(format!("{}:{}", first, last)))?;

    let mut sql = String::from(
        "SELECT id, created_at, actor_email, action, domain, details
         FROM audit_log
         WHERE created_at >= ? AND created_at < ?",
    );
    let mut args: Vec<Value> = vec![Value::Text(start), Value::Text(end)];

    let placeholders = vec!["?"; domains.len()].join(", ");
    sql.push_str(&format!(" AND domain IN ({})", placeholders));
    args.extend(domains.iter().map(|d| Value::Text(d.to_db_str().into())));

    if let Some(action) = query.operation.and_then(|op| op.action()) {
        sql.push_str(" AND action = ?");
        args.push(Value::Text(action.to_db_str().into()));
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
    args.push(Value::Integer(i64::try_from(query.limit).unwrap_or(i64::MAX)));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every audit row, oldest first. Used by export when no range is given.
pub fn load_all_entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, actor_email, action, domain, details
         FROM audit_log
         ORDER BY created_at ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Map an `audit_log` row. An unreadable timestamp becomes `None`; an
/// unknown action or domain is a conversion error.
pub fn map_row(row: &Row) -> Result<LogEntry> {
    let created_at: Option<String> = row.get("created_at")?;
    let created_at = created_at.as_deref().and_then(from_stored);

    let action_str: String = row.get("action")?;
    let action = Action::from_db_str(&action_str)
        .ok_or_else(|| conversion_error(AppError::InvalidAction(action_str.clone())))?;

    let domain_str: String = row.get("domain")?;
    let domain = Domain::from_db_str(&domain_str)
        .ok_or_else(|| conversion_error(AppError::InvalidDomain(domain_str.clone())))?;

    Ok(LogEntry {
        id: row.get("id")?,
        created_at,
        actor_email: row.get("actor_email")?,
        action,
        domain,
        details: row.get::<_, Option<String>>("details")?.unwrap_or_default(),
    })
}

// ---------------------------
// Coach time off
// ---------------------------

pub fn insert_time_off(conn: &Connection, row: &NewTimeOff) -> AppResult<i64> {
    if row.start_date > row.end_date {
        return Err(AppError::InvalidRange(format!(
            "{} > {}",
            row.start_date, row.end_date
        )));
    }

    conn.execute(
        "INSERT INTO coach_time_off (coach_id, start_date, end_date, reason)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            row.coach_id,
            row.start_date.format("%Y-%m-%d").to_string(),
            row.end_date.format("%Y-%m-%d").to_string(),
            row.reason,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Time-off ranges, optionally for a single coach, ordered by coach then start.
pub fn load_time_off(conn: &Connection, coach: Option<&str>) -> AppResult<Vec<TimeOffRange>> {
    let mut stmt = conn.prepare(
        "SELECT id, coach_id, start_date, end_date, reason
         FROM coach_time_off
         WHERE (?1 IS NULL OR coach_id = ?1)
         ORDER BY coach_id ASC, start_date ASC, id ASC",
    )?;
    let rows = stmt.query_map([coach], map_time_off_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_time_off_row(row: &Row) -> Result<TimeOffRange> {
    let parse = |col: &str| -> Result<NaiveDate> {
        let s: String = row.get(col)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| conversion_error(AppError::InvalidDate(s.clone())))
    };

    Ok(TimeOffRange {
        id: row.get("id")?,
        coach_id: row.get("coach_id")?,
        start_date: parse("start_date")?,
        end_date: parse("end_date")?,
        reason: row.get("reason")?,
    })
}

// ---------------------------
// Log source
// ---------------------------

/// [`LogSource`] backed by the local SQLite database.
pub struct SqliteLogSource<'a> {
    pool: &'a DbPool,
}

impl<'a> SqliteLogSource<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl LogSource for SqliteLogSource<'_> {
    fn fetch(&self, query: &LogQuery) -> AppResult<Vec<LogEntry>> {
        fetch_entries(&self.pool.conn, query).map_err(|e| match e {
            AppError::Db(inner) => AppError::LogSource(inner.to_string()),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::models::Operation;
    use crate::utils::time::parse_timestamp;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn
    }

    fn add(conn: &Connection, ts: &str, action: Action, domain: Domain, details: &str) -> i64 {
        insert_entry(
            conn,
            &NewAuditRow {
                created_at: parse_timestamp(ts),
                actor_email: Some("desk@example.com".into()),
                action,
                domain,
                details: details.into(),
            },
        )
        .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_is_newest_first_and_bounded_by_local_days() {
        let c = conn();
        add(&c, "2025-04-02 10:00", Action::Create, Domain::Bookings, "a");
        add(&c, "2025-04-03 10:00", Action::Create, Domain::Bookings, "b");
        add(&c, "2025-04-03 15:00", Action::Update, Domain::Bookings, "c");
        add(&c, "2025-04-04 10:00", Action::Delete, Domain::Bookings, "d");

        let rows = fetch_entries(&c, &LogQuery::new((day(2025, 4, 3), day(2025, 4, 3)), 500)).unwrap();
        let details: Vec<_> = rows.iter().map(|r| r.details.as_str()).collect();
        assert_eq!(details, vec!["c", "b"]);
    }

    #[test]
    fn operation_and_limit_narrow_the_fetch() {
        let c = conn();
        add(&c, "2025-04-03 10:00", Action::Create, Domain::Bookings, "a");
        add(&c, "2025-04-03 11:00", Action::Update, Domain::Bookings, "b");
        add(&c, "2025-04-03 12:00", Action::Update, Domain::CoachAssignment, "c");

        let range = (day(2025, 4, 3), day(2025, 4, 3));
        let updates = fetch_entries(
            &c,
            &LogQuery::new(range, 500).with_operation(Some(Operation::Update)),
        )
        .unwrap();
        assert_eq!(updates.len(), 2);

        let schedule = fetch_entries(
            &c,
            &LogQuery::new(range, 500).with_operation(Some(Operation::Schedule)),
        )
        .unwrap();
        assert_eq!(schedule.len(), 1);
        assert!(schedule[0].is_coach_assignment());

        let capped = fetch_entries(&c, &LogQuery::new(range, 1)).unwrap();
        assert_eq!(capped[0].details, "c");
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let c = conn();
        let err = fetch_entries(&c, &LogQuery::new((day(2025, 4, 4), day(2025, 4, 3)), 10));
        assert!(matches!(err, Err(AppError::InvalidRange(_))));
    }

    #[test]
    fn time_off_filters_by_coach() {
        let c = conn();
        for (coach, s, e) in [("papa", 10, 10), ("papa", 11, 12), ("ed", 1, 2)] {
            insert_time_off(
                &c,
                &NewTimeOff {
                    coach_id: coach.into(),
                    start_date: day(2025, 3, s),
                    end_date: day(2025, 3, e),
                    reason: None,
                },
            )
            .unwrap();
        }

        assert_eq!(load_time_off(&c, None).unwrap().len(), 3);
        let papa = load_time_off(&c, Some("papa")).unwrap();
        assert_eq!(papa.len(), 2);
        assert_eq!(papa[1].end_date, day(2025, 3, 12));
    }
}
