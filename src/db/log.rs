use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Operations written to the internal `log` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOp {
    Init,
    Record,
    Import,
    TimeOff,
    MigrationApplied,
}

impl LogOp {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LogOp::Init => "init",
            LogOp::Record => "record",
            LogOp::Import => "import",
            LogOp::TimeOff => "timeoff",
            LogOp::MigrationApplied => "migration_applied",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "init" => Some(LogOp::Init),
            "record" => Some(LogOp::Record),
            "import" => Some(LogOp::Import),
            "timeoff" => Some(LogOp::TimeOff),
            "migration_applied" => Some(LogOp::MigrationApplied),
            _ => None,
        }
    }
}

/// Append a bookkeeping line (tool activity, not the booking audit trail).
pub fn ttlog(conn: &Connection, op: LogOp, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![
        Local::now().to_rfc3339(),
        op.to_db_str(),
        target,
        message
    ])?;

    Ok(())
}
