use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let mut pool = DbPool::open_migrated(&cfg.database)?;
        let count = RecordLogic::import_csv(&mut pool, Path::new(file))?;
        success(format!("Imported {} audit rows from {}", count, file));
    }
    Ok(())
}
