use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::LocalClock;
use crate::core::controller::LocationController;
use crate::core::sensor::{CommandSensor, OfficeDetector};
use crate::core::watch::{WatchLoop, detect_shutdown};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::runtime::single_thread_runtime;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval } = cmd {
        let minutes = interval.unwrap_or(cfg.check_interval_minutes);
        let period = Config::check_interval(minutes)?;
        let controller = LocationController::new(open_store(cfg)?, Box::new(LocalClock));

        let detector = if cfg.office_ssid.trim().is_empty() {
            None
        } else {
            let sensor = CommandSensor::new(cfg.scan_command.as_deref());
            Some(OfficeDetector::new(Arc::new(sensor), &cfg.office_ssid))
        };

        info(format!(
            "Watching (office check every {minutes} min). Type wfh, office, status or quit."
        ));

        let shutdown = CancellationToken::new();
        let watch = WatchLoop::new(controller, detector, period, shutdown.clone());

        let runtime = single_thread_runtime()?;
        let result = runtime.block_on(async move {
            tokio::spawn(detect_shutdown(shutdown.clone()));
            let result = watch.run(BufReader::new(tokio::io::stdin())).await;
            shutdown.cancel();
            result
        });
        // a pending stdin read or Wi-Fi scan must not keep the process alive
        runtime.shutdown_timeout(SHUTDOWN_GRACE);
        result?;

        info("Stopped watching.");
    }
    Ok(())
}
