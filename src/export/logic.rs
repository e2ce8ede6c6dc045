use crate::config::Config;
use crate::core::search::filter_entries;
use crate::core::timeline::FilterInput;
use crate::db::pool::DbPool;
use crate::db::queries::{fetch_entries, load_all_entries};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_parent_dir, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::DecodedExport;
use crate::export::range::parse_range;
use crate::models::{LogEntry, LogQuery};
use crate::ui::messages::warning;
use std::path::Path;

/// What to export and where.
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    pub file: &'a str,
    pub filters: FilterInput<'a>,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export decoded audit entries as flat rows.
    ///
    /// `filters.range` may be `None` or `"all"` (whole table) or any
    /// `--range` expression. Unlike `timeline`, export is not capped by
    /// `fetch_limit`. Returns the number of rows written.
    pub fn export(pool: &DbPool, req: &ExportRequest<'_>, cfg: &Config) -> AppResult<usize> {
        let path = Path::new(req.file);

        let entries = Self::load(pool, &req.filters)?;
        let filters = req.filters.filter_set(cfg);
        let rows: Vec<DecodedExport> = filter_entries(&entries, &filters)
            .iter()
            .map(DecodedExport::from)
            .collect();

        if rows.is_empty() {
            warning("No audit entries found for the selected range and filters.");
            return Ok(0);
        }

        ensure_writable(path, req.force)?;
        ensure_parent_dir(path)?;

        match req.format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        tracing::debug!(format = req.format.as_str(), rows = rows.len(), "export written");
        Ok(rows.len())
    }

    fn load(pool: &DbPool, input: &FilterInput<'_>) -> AppResult<Vec<LogEntry>> {
        let operation = input.operation()?;

        match input.range {
            Some(r) if !r.eq_ignore_ascii_case("all") => {
                let query = LogQuery::new(parse_range(r)?, usize::MAX).with_operation(operation);
                fetch_entries(&pool.conn, &query)
            }
            _ => {
                let mut all = load_all_entries(&pool.conn)?;
                if let Some(op) = operation {
                    all.retain(|e| op.matches(e));
                }
                // newest first, like a ranged fetch
                all.reverse();
                Ok(all)
            }
        }
    }
}
