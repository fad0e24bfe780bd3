pub mod check;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod set;
pub mod status;
pub mod summary;
pub mod watch;

use crate::config::Config;
use crate::db::WorkLogStore;
use crate::errors::AppResult;

/// Store at the configured path, schema ensured.
pub(crate) fn open_store(cfg: &Config) -> AppResult<WorkLogStore> {
    let store = WorkLogStore::new(cfg.database_path());
    store.init_schema()?;
    Ok(store)
}
