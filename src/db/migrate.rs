use crate::db::log::LogOp;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the internal `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = ?2 AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk
        .query_row([version, LogOp::MigrationApplied.to_db_str()], |_| Ok(()))
        .optional()?
        .is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), ?1, ?2, ?3)",
        [LogOp::MigrationApplied.to_db_str(), version, message],
    )?;
    Ok(())
}

/// Create the `audit_log` table with the current schema.
fn create_audit_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT,
            actor_email TEXT,
            action      TEXT NOT NULL CHECK(action IN ('create','update','delete')),
            domain      TEXT NOT NULL DEFAULT 'bookings'
                        CHECK(domain IN ('bookings','coach_assignment')),
            details     TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_audit_log_created_at ON audit_log(created_at);
        "#,
    )?;
    Ok(())
}

/// Create the `coach_time_off` table.
fn create_time_off_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS coach_time_off (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            coach_id    TEXT NOT NULL,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            reason      TEXT,
            CHECK(start_date <= end_date)
        );

        CREATE INDEX IF NOT EXISTS idx_time_off_coach_start ON coach_time_off(coach_id, start_date);
        "#,
    )?;
    Ok(())
}

/// Early databases kept audit rows without a domain column; every such row
/// came from the bookings screen.
fn migrate_add_domain_to_audit_log(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_add_audit_domain";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "audit_log", "domain")? {
        warning("Adding 'domain' column to audit_log table...");
        conn.execute(
            "ALTER TABLE audit_log ADD COLUMN domain TEXT NOT NULL DEFAULT 'bookings';",
            [],
        )?;
        success(format!(
            "Migration applied: {} → added 'domain' to audit_log table",
            version
        ));
    }

    mark_applied(conn, version, "Added domain column to audit_log")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by `DbPool::open_migrated` and the `init` command.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "audit_log")? {
        create_audit_log_table(conn)?;
        success("Created audit_log table.");
    }
    migrate_add_domain_to_audit_log(conn)?;
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_audit_log_created_at ON audit_log(created_at);",
    )?;

    if !table_exists(conn, "coach_time_off")? {
        create_time_off_table(conn)?;
        success("Created coach_time_off table.");
    }

    Ok(())
}
