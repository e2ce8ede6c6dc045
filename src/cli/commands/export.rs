use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filters,
        force,
    } = cmd
    {
        let pool = DbPool::open_migrated(&cfg.database)?;
        let req = ExportRequest {
            format: *format,
            file,
            filters: filters.as_input(),
            force: *force,
        };
        ExportLogic::export(&pool, &req, cfg)?;
    }
    Ok(())
}
