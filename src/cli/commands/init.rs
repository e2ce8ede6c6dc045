use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::{LogOp, ttlog};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// `init`: write the config file (skipped with `--test`), create the
/// database and apply pending migrations. Safe to run twice.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().into_owned();

    println!("⚙️  Initializing bookinglog…");
    println!("🗄️  Database   : {db_path}");

    let pool = DbPool::open_migrated(&db_path)?;
    tracing::debug!(path = %db_path, "schema up to date");

    success(format!("Database initialized at {db_path}"));

    if let Err(e) = ttlog(&pool.conn, LogOp::Init, &db_path, "Database initialized") {
        warning(format!("Failed to write internal log: {e}"));
    }

    Ok(())
}
