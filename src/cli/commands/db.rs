use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::stats;
use crate::errors::AppResult;
use ansi_term::Colour::{Cyan, Green, Red};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info,
    } = cmd
    {
        let store = open_store(cfg)?;
        let conn = store.open()?;
        let db_path = store.path().to_string_lossy().to_string();

        if *info {
            stats::print_db_info(&conn, &db_path)?;
        }

        if *check {
            println!("{}", Cyan.paint("▶ Running integrity check…"));

            let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}\n", Green.paint("✔ Integrity check passed."));
            } else {
                println!("{} {}\n", Red.paint("✘ Integrity check failed:"), integrity);
            }
        }

        if *vacuum {
            println!("{}", Cyan.paint("▶ Running VACUUM…"));
            conn.execute_batch("VACUUM;")?;
            println!("{}\n", Green.paint("✔ Vacuum completed."));
        }
    }

    Ok(())
}
