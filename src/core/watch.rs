//! Long-running watch loop.
//!
//! Timer ticks, manual commands read from an input stream and sensor
//! results all land on a single task, so transitions never interleave. The
//! blocking Wi-Fi scan runs on the blocking pool and reports back through a
//! channel.

use crate::core::controller::{CheckOutcome, LocationController};
use crate::core::sensor::OfficeDetector;
use crate::errors::AppResult;
use crate::models::Action;
use crate::ui::messages::{error, info, success, warning};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error as log_error, info as log_info, warn};

/// A line typed while watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    Select(Action),
    Status,
    Quit,
}

impl WatchCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "status" | "s" => Some(WatchCommand::Status),
            "quit" | "q" | "exit" => Some(WatchCommand::Quit),
            other => Action::from_code(other).map(WatchCommand::Select),
        }
    }
}

pub struct WatchLoop {
    controller: LocationController,
    detector: Option<OfficeDetector>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl WatchLoop {
    pub fn new(
        controller: LocationController,
        detector: Option<OfficeDetector>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            controller,
            detector,
            interval,
            shutdown,
        }
    }

    /// Runs until `quit` is read or the shutdown token is cancelled.
    /// Returns the controller so callers can inspect the final state.
    pub async fn run<R>(mut self, input: R) -> AppResult<LocationController>
    where
        R: AsyncBufRead + Unpin,
    {
        let (scan_tx, mut scan_rx) = mpsc::channel::<AppResult<bool>>(1);

        // first tick fires immediately
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut lines = input.lines();
        let mut input_open = true;
        let mut scanning = false;

        if self.detector.is_none() {
            warning("Office detection disabled: no office network configured.");
        }
        self.print_status();

        loop {
            select! {
                _ = self.shutdown.cancelled() => {
                    log_info!("Shutdown requested");
                    break;
                }

                _ = ticker.tick() => {
                    if scanning {
                        debug!("Previous scan still running, skipping tick");
                        continue;
                    }
                    if let Some(detector) = self.detector.clone() {
                        scanning = self.dispatch_scan(detector, scan_tx.clone());
                    } else if let Err(e) = self.controller.refresh() {
                        log_error!("Cannot read today's state: {e}");
                    }
                }

                Some(result) = scan_rx.recv() => {
                    scanning = false;
                    self.handle_scan(result);
                }

                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match WatchCommand::parse(&line) {
                            Some(WatchCommand::Quit) => break,
                            Some(WatchCommand::Status) => self.print_status(),
                            Some(WatchCommand::Select(action)) => self.handle_select(action),
                            None => warning(format!(
                                "Unknown command '{}'. Use wfh, office, status or quit.",
                                line.trim()
                            )),
                        }
                    }
                    Ok(None) => {
                        debug!("Input closed, continuing with timer only");
                        input_open = false;
                    }
                    Err(e) => {
                        warn!("Cannot read input: {e}");
                        input_open = false;
                    }
                },
            }
        }

        Ok(self.controller)
    }

    /// Apply the guard and, if needed, start a background scan.
    /// Returns whether a scan is now in flight.
    fn dispatch_scan(
        &mut self,
        detector: OfficeDetector,
        tx: mpsc::Sender<AppResult<bool>>,
    ) -> bool {
        match self.controller.needs_scan() {
            Ok(false) => {
                debug!("Office already recorded for today, skipping scan");
                false
            }
            Ok(true) => {
                debug!(ssid = detector.office_ssid(), "Starting Wi-Fi scan");
                tokio::task::spawn_blocking(move || {
                    let result = detector.office_visible();
                    // receiver is gone only when the loop has ended
                    let _ = tx.blocking_send(result);
                });
                true
            }
            Err(e) => {
                log_error!("Cannot read today's state, skipping check: {e}");
                false
            }
        }
    }

    fn handle_scan(&mut self, result: AppResult<bool>) {
        match result {
            Ok(visible) => match self.controller.apply_scan(visible) {
                Ok(CheckOutcome::OfficeDetected) => {
                    success(format!("{}: office network found, marked as Office", self.controller.today()));
                }
                Ok(outcome) => debug!("Check finished: {outcome}"),
                Err(e) => log_error!("Cannot record office presence: {e}"),
            },
            Err(e) => warn!("Office check skipped: {e}"),
        }
    }

    fn handle_select(&mut self, action: Action) {
        match self.controller.select(action) {
            Ok(state) => success(format!("{}: {state}", self.controller.today())),
            Err(e) => error(format!("Cannot record {action}: {e}")),
        }
    }

    fn print_status(&mut self) {
        match self.controller.refresh() {
            Ok(state) => info(format!("{}: {state}", self.controller.today())),
            Err(e) => error(format!("Cannot read today's state: {e}")),
        }
    }
}

/// Cancels `token` on Ctrl-C.
pub async fn detect_shutdown(token: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => token.cancel(),
        _ = token.cancelled() => (),
    }
}
