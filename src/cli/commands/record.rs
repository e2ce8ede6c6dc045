use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        details,
        action,
        domain,
        actor,
        at,
    } = cmd
    {
        let pool = DbPool::open_migrated(&cfg.database)?;
        let id = RecordLogic::record(
            &pool,
            details,
            action,
            domain,
            actor.as_deref(),
            at.as_deref(),
        )?;
        success(format!("Audit row #{} recorded", id));
    }
    Ok(())
}
