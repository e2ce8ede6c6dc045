use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Log { print, tail } = cmd else {
        return Ok(());
    };

    if !print {
        info("Nothing to do. Use `log --print` to show the internal log.");
        return Ok(());
    }

    let pool = DbPool::open_migrated(&cfg.database)?;
    LogLogic::print_log(&pool, *tail)
}
