use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rChoreboard…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));

    log::audit(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rChoreboard initialization completed!");
    Ok(())
}
