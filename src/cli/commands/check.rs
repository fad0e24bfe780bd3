use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::clock::LocalClock;
use crate::core::controller::{CheckOutcome, LocationController};
use crate::core::sensor::{CommandSensor, OfficeDetector};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::sync::Arc;

/// Handle the `check` command: one run of the periodic office check.
///
/// Sensor problems are reported but do not fail the command; storage
/// problems do.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut controller = LocationController::new(open_store(cfg)?, Box::new(LocalClock));
    let sensor = CommandSensor::new(cfg.scan_command.as_deref());
    let detector = OfficeDetector::new(Arc::new(sensor), &cfg.office_ssid);

    match controller.periodic_check(&detector) {
        Ok(CheckOutcome::OfficeDetected) => {
            success(format!("{}: {}", controller.today(), CheckOutcome::OfficeDetected))
        }
        Ok(outcome) => info(format!("{}: {}", controller.today(), outcome)),
        Err(AppError::SensorUnavailable(reason)) => {
            warning(format!("Office check skipped: {reason}"))
        }
        Err(e) => return Err(e),
    }
    Ok(())
}
