use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timeline::TimelineLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timeline { filters, json } = cmd {
        let input = filters.as_input();
        let query = input.log_query(cfg)?;
        let filter_set = input.filter_set(cfg);

        let pool = DbPool::open_migrated(&cfg.database)?;
        let view = TimelineLogic::load(&pool, query, &filter_set);

        if *json {
            TimelineLogic::print_json(&view.groups)?;
        } else {
            TimelineLogic::print(&view, cfg);
        }
    }
    Ok(())
}
