use crate::cli::parser::Cli;
use crate::config::Config;
use crate::config_path;
use crate::db::WorkLogStore;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its schema
///
/// `cfg` already carries the environment and `--db` overrides; only an
/// explicit `--db` is written to the config file.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = config_path(cli);
    let custom_db = cli.db.as_ref().map(|_| cfg.database.as_str());
    Config::init_all(&path, custom_db, cli.test)?;
    let db_path = cfg.database_path();
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    println!("⚙️  Initializing wfhtracker…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", db_path.display());

    let store = WorkLogStore::new(db_path.clone());
    store.init_schema()?;

    success(format!("Database initialized at {}", db_path.display()));

    let conn = store.open()?;
    log::ttlog_quiet(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    );

    if cfg.office_ssid.is_empty() {
        info("Set 'office_ssid' in the config file to enable automatic office detection.");
    }

    println!("🎉 wfhtracker initialization completed!");
    Ok(())
}
