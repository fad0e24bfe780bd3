use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::LocalClock;
use crate::core::controller::LocationController;
use crate::errors::{AppError, AppResult};
use crate::models::Action;
use crate::ui::messages::success;
use crate::utils::date::resolve_date;

/// Handle the `set` command: a manual selection always wins.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Set { action, date } = cmd {
        let action = Action::from_code(action).ok_or_else(|| {
            AppError::InvalidAction(format!("'{}'. Use 'wfh' or 'office'.", action))
        })?;
        let date = resolve_date(date.as_deref())?;

        let mut controller = LocationController::new(open_store(cfg)?, Box::new(LocalClock));
        let state = controller.select_on(date, action)?;

        success(format!("{}: {}", date, state));
    }
    Ok(())
}
