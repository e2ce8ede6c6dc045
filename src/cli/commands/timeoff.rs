use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timeoff::TimeOffLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timeoff {
        add,
        coach,
        start,
        end,
        reason,
        json,
    } = cmd
    {
        let pool = DbPool::open_migrated(&cfg.database)?;

        if *add {
            let missing = |name: &str| AppError::InvalidInput(format!("--add requires --{name}"));
            let coach = coach.as_deref().ok_or_else(|| missing("coach"))?;
            let start = start.as_deref().ok_or_else(|| missing("start"))?;
            let end = end.as_deref().ok_or_else(|| missing("end"))?;

            let id = TimeOffLogic::add(&pool, coach, start, end, reason.as_deref())?;
            success(format!("Time off #{} recorded for {}", id, coach));
            return Ok(());
        }

        let merged = TimeOffLogic::merged(&pool, coach.as_deref())?;
        if *json {
            println!("{}", serde_json::to_string_pretty(&merged)?);
        } else {
            TimeOffLogic::print(&merged);
        }
    }
    Ok(())
}
