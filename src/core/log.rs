//! Viewer for the internal bookkeeping table (`log`), not the audit trail.

use crate::db::log::LogOp;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::pad_right;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

/// Column cap for the "operation (target)" cell.
const OP_WIDTH_CAP: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match LogOp::from_db_str(op) {
        Some(LogOp::Record | LogOp::Import) => Colour::Green,
        Some(LogOp::TimeOff) => Colour::Yellow,
        Some(LogOp::MigrationApplied) => Colour::Purple,
        Some(LogOp::Init) => Colour::RGB(255, 153, 51),
        None => Colour::White,
    }
}

pub struct InternalLogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn truncate_cols(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if UnicodeWidthStr::width(out.as_str()) + 4 > max {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool) -> AppResult<Vec<InternalLogRow>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(InternalLogRow {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn print_log(pool: &DbPool, tail: Option<usize>) -> AppResult<()> {
        let mut entries = Self::load(pool)?;
        if let Some(n) = tail {
            let skip = entries.len().saturating_sub(n);
            entries.drain(..skip);
        }
        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let cell = |e: &InternalLogRow| {
            if e.target.is_empty() {
                e.operation.clone()
            } else {
                truncate_cols(&format!("{} ({})", e.operation, e.target), OP_WIDTH_CAP)
            }
        };

        let op_w = entries
            .iter()
            .map(|e| UnicodeWidthStr::width(cell(e).as_str()))
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for e in &entries {
            let text = pad_right(&cell(e), op_w);
            // colour only the operation word, the padding stays plain
            let (op, rest) = text.split_at(e.operation.len().min(text.len()));
            println!(
                "{:>id_w$}: {} | {}{} => {}",
                e.id,
                e.date,
                color_for_operation(&e.operation).paint(op),
                rest,
                e.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
