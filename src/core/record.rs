//! Appending raw audit rows: one at a time (`record`) or from a CSV file
//! (`import`). Rows are stored verbatim; decoding happens on read.

use crate::db::log::{LogOp, ttlog};
use crate::db::models::NewAuditRow;
use crate::db::pool::DbPool;
use crate::db::queries::insert_entry;
use crate::errors::{AppError, AppResult};
use crate::models::{Action, Domain};
use crate::utils::time::parse_timestamp;
use chrono::Local;
use serde::Deserialize;
use std::path::Path;

/// One line of an import file. Header:
/// `created_at,actor_email,action,domain,details`.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    actor_email: Option<String>,
    action: String,
    #[serde(default)]
    domain: Option<String>,
    details: String,
}

pub fn parse_action(code: &str) -> AppResult<Action> {
    Action::from_code(code).ok_or_else(|| AppError::InvalidAction(code.to_string()))
}

pub fn parse_domain(code: &str) -> AppResult<Domain> {
    Domain::from_code(code).ok_or_else(|| AppError::InvalidDomain(code.to_string()))
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl ImportRow {
    fn into_new_row(self) -> Result<NewAuditRow, String> {
        let created_at = match non_blank(self.created_at) {
            Some(ts) => Some(parse_timestamp(&ts).ok_or(format!("invalid created_at '{ts}'"))?),
            None => None,
        };
        let action = parse_action(&self.action).map_err(|e| e.to_string())?;
        let domain = match non_blank(self.domain) {
            Some(d) => parse_domain(&d).map_err(|e| e.to_string())?,
            None => Domain::Bookings,
        };

        Ok(NewAuditRow {
            created_at,
            actor_email: non_blank(self.actor_email),
            action,
            domain,
            details: self.details,
        })
    }
}

pub struct RecordLogic;

impl RecordLogic {
    /// Append one row; `at` defaults to now.
    pub fn record(
        pool: &DbPool,
        details: &str,
        action: &str,
        domain: &str,
        actor: Option<&str>,
        at: Option<&str>,
    ) -> AppResult<i64> {
        let created_at = match at {
            Some(ts) => parse_timestamp(ts).ok_or_else(|| AppError::InvalidTimestamp(ts.into()))?,
            None => Local::now(),
        };

        let row = NewAuditRow {
            created_at: Some(created_at),
            actor_email: actor.map(str::to_string),
            action: parse_action(action)?,
            domain: parse_domain(domain)?,
            details: details.to_string(),
        };

        let id = insert_entry(&pool.conn, &row)?;
        tracing::debug!(id, action = row.action.to_db_str(), "audit row recorded");

        if let Err(e) = ttlog(&pool.conn, LogOp::Record, &id.to_string(), "Audit row recorded") {
            tracing::warn!(error = %e, "failed to write internal log");
        }
        Ok(id)
    }

    /// Import every row of `file` in one transaction. The first bad row
    /// aborts the import and nothing is written.
    pub fn import_csv(pool: &mut DbPool, file: &Path) -> AppResult<usize> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_path(file)?;

        let mut rows = Vec::new();
        for (i, rec) in rdr.deserialize::<ImportRow>().enumerate() {
            // line 1 is the header
            let line = i + 2;
            let rec = rec.map_err(|e| AppError::Import {
                row: line,
                message: e.to_string(),
            })?;
            let row = rec
                .into_new_row()
                .map_err(|message| AppError::Import { row: line, message })?;
            rows.push(row);
        }

        let count = rows.len();
        pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            for row in &rows {
                insert_entry(&tx, row).map_err(|e| match e {
                    AppError::Db(inner) => inner,
                    other => rusqlite::Error::ToSqlConversionFailure(Box::new(other)),
                })?;
            }
            tx.commit()
        })?;

        ttlog(
            &pool.conn,
            LogOp::Import,
            &file.display().to_string(),
            &format!("Imported {count} audit rows"),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::queries::load_all_entries;
    use std::fs;

    fn pool() -> DbPool {
        let pool = DbPool::new(":memory:").unwrap();
        run_pending_migrations(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn record_rejects_unknown_action() {
        let p = pool();
        let err = RecordLogic::record(&p, "x", "rename", "bookings", None, None);
        assert!(matches!(err, Err(AppError::InvalidAction(_))));
    }

    #[test]
    fn import_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        fs::write(
            &path,
            "created_at,actor_email,action,domain,details\n\
             2025-04-03 09:00,a@x.com,create,bookings,新增預約：04/03 08:30 G23 Ming\n\
             2025-04-03 10:00,,explode,bookings,bad\n",
        )
        .unwrap();

        let mut p = pool();
        let err = RecordLogic::import_csv(&mut p, &path).unwrap_err();
        assert!(matches!(err, AppError::Import { row: 3, .. }));
        assert!(load_all_entries(&p.conn).unwrap().is_empty());
    }

    #[test]
    fn import_defaults_domain_and_keeps_blank_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        fs::write(
            &path,
            "created_at,actor_email,action,domain,details\n\
             ,,update,,修改預約：04/03 08:30 Ming，變更：時間\n\
             2025-04-03 10:00,desk@x.com,create,schedule,assign\n",
        )
        .unwrap();

        let mut p = pool();
        assert_eq!(RecordLogic::import_csv(&mut p, &path).unwrap(), 2);

        let rows = load_all_entries(&p.conn).unwrap();
        assert_eq!(rows.len(), 2);
        let undated = rows.iter().find(|r| r.created_at.is_none()).unwrap();
        assert_eq!(undated.domain, Domain::Bookings);
        assert!(rows.iter().any(|r| r.is_coach_assignment()));
    }
}
