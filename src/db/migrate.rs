use rusqlite::{Connection, OptionalExtension, Result};
use tracing::{debug, info};

const WORK_LOG_VERSION: &str = "20250301_0001_create_work_log";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `work_log` table exists.
fn work_log_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='work_log'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `work_log` table. Files written by older trackers already
/// carry a compatible `work_log(id, date UNIQUE, action)` and are left as-is.
fn create_work_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work_log (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            date    TEXT NOT NULL UNIQUE,
            action  TEXT NOT NULL CHECK(action IN ('WFH','Office'))
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Public entry point: create every missing table and index.
///
/// Safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let existed = work_log_table_exists(conn)?;
    create_work_log_table(conn)?;
    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_work_log_date ON work_log(date);")?;

    if !migration_applied(conn, WORK_LOG_VERSION)? {
        let message = if existed {
            "Adopted existing work_log table"
        } else {
            "Created work_log table"
        };
        mark_applied(conn, WORK_LOG_VERSION, message)?;
        info!(version = WORK_LOG_VERSION, "{message}");
    } else {
        debug!("Schema up to date");
    }

    Ok(())
}
