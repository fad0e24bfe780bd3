//! Location decision surface: today's state, manual selection and the
//! automatic office check, all written through to the store.

use crate::core::clock::Clock;
use crate::core::sensor::OfficeDetector;
use crate::db::WorkLogStore;
use crate::db::log::ttlog_quiet;
use crate::db::store::{get_action_on, upsert_on};
use crate::errors::AppResult;
use crate::models::{Action, DayState};
use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, info};

/// Result of one automatic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Today is already Office: sensor not queried, nothing written.
    AlreadyOffice,
    /// Office network seen: today switched to Office.
    OfficeDetected,
    /// Office network not seen: state unchanged.
    NotDetected,
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::AlreadyOffice => f.write_str("today is already marked as Office"),
            CheckOutcome::OfficeDetected => f.write_str("office network found, marked as Office"),
            CheckOutcome::NotDetected => f.write_str("office network not found"),
        }
    }
}

pub struct LocationController {
    store: WorkLogStore,
    clock: Box<dyn Clock>,
    state: DayState,
}

impl LocationController {
    pub fn new(store: WorkLogStore, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: DayState::Unset,
        }
    }

    pub fn store(&self) -> &WorkLogStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Last state read from the store.
    pub fn state(&self) -> DayState {
        self.state
    }

    /// Re-read today's state from the store.
    pub fn refresh(&mut self) -> AppResult<DayState> {
        self.state = self.store.get_action(self.today())?.into();
        Ok(self.state)
    }

    /// Manual selection for today. Always applied.
    pub fn select(&mut self, action: Action) -> AppResult<DayState> {
        let today = self.today();
        self.select_on(today, action)
    }

    /// Manual selection for any date (back-filling a forgotten day).
    pub fn select_on(&mut self, date: NaiveDate, action: Action) -> AppResult<DayState> {
        let today = self.today();
        let conn = self.store.open()?;

        upsert_on(&conn, date, action)?;
        ttlog_quiet(
            &conn,
            "set",
            &date.to_string(),
            &format!("Manually marked as {action}"),
        );
        info!(%date, %action, "Manual selection");

        self.state = get_action_on(&conn, today)?.into();
        Ok(DayState::from(get_action_on(&conn, date)?))
    }

    /// Guard of the automatic check: no scan needed once today is Office.
    pub fn needs_scan(&mut self) -> AppResult<bool> {
        Ok(!self.refresh()?.is_office())
    }

    /// Apply a sensor reading. Only ever moves today towards Office.
    pub fn apply_scan(&mut self, office_visible: bool) -> AppResult<CheckOutcome> {
        let today = self.today();
        let conn = self.store.open()?;

        // The state may have changed while the scan was running.
        self.state = get_action_on(&conn, today)?.into();
        if self.state.is_office() {
            return Ok(CheckOutcome::AlreadyOffice);
        }
        if !office_visible {
            debug!(%today, "Office network not visible");
            return Ok(CheckOutcome::NotDetected);
        }

        upsert_on(&conn, today, Action::Office)?;
        ttlog_quiet(
            &conn,
            "auto",
            &today.to_string(),
            "Office network detected, marked as Office",
        );
        info!(%today, "Office network detected");

        self.state = get_action_on(&conn, today)?.into();
        Ok(CheckOutcome::OfficeDetected)
    }

    /// Guard, then sensor, then write. Blocks for the duration of the scan.
    pub fn periodic_check(&mut self, detector: &OfficeDetector) -> AppResult<CheckOutcome> {
        if !self.needs_scan()? {
            debug!("Office already recorded for today, skipping scan");
            return Ok(CheckOutcome::AlreadyOffice);
        }
        let visible = detector.office_visible()?;
        self.apply_scan(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::sensor::MockSensor;
    use crate::db::log::load_log;
    use crate::errors::AppError;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    fn setup() -> (TempDir, LocationController) {
        let dir = tempfile::tempdir().unwrap();
        let store = WorkLogStore::new(dir.path().join("wfh.sqlite"));
        store.init_schema().unwrap();
        let controller = LocationController::new(store, Box::new(FixedClock(day())));
        (dir, controller)
    }

    fn detector(sensor: MockSensor) -> OfficeDetector {
        OfficeDetector::new(Arc::new(sensor), "CorpNet")
    }

    fn sees(names: &'static [&'static str]) -> MockSensor {
        let mut sensor = MockSensor::new();
        sensor
            .expect_visible_networks()
            .returning(move || Ok(names.iter().map(|s| s.to_string()).collect::<HashSet<_>>()));
        sensor
    }

    fn audit_rows(c: &LocationController) -> usize {
        load_log(&c.store().open().unwrap()).unwrap().len()
    }

    #[test]
    fn fresh_day_is_unset() {
        let (_dir, mut c) = setup();
        assert_eq!(c.refresh().unwrap(), DayState::Unset);
    }

    #[test]
    fn manual_selection_always_wins() {
        let (_dir, mut c) = setup();
        for start in [None, Some(Action::Wfh), Some(Action::Office)] {
            for choice in [Action::Wfh, Action::Office] {
                if let Some(a) = start {
                    c.select(a).unwrap();
                }
                assert_eq!(c.select(choice).unwrap(), DayState::from(Some(choice)));
                assert_eq!(c.refresh().unwrap(), DayState::from(Some(choice)));
            }
        }
    }

    #[test]
    fn already_office_skips_sensor_and_write() {
        let (_dir, mut c) = setup();
        c.select(Action::Office).unwrap();
        let before = audit_rows(&c);

        let mut sensor = MockSensor::new();
        sensor.expect_visible_networks().times(0);

        let outcome = c.periodic_check(&detector(sensor)).unwrap();
        assert_eq!(outcome, CheckOutcome::AlreadyOffice);
        assert_eq!(audit_rows(&c), before);
        assert_eq!(c.state(), DayState::Office);
    }

    #[test]
    fn detection_switches_unset_to_office() {
        let (_dir, mut c) = setup();
        let outcome = c.periodic_check(&detector(sees(&["corpnet"]))).unwrap();
        assert_eq!(outcome, CheckOutcome::OfficeDetected);
        assert_eq!(c.store().get_action(day()).unwrap(), Some(Action::Office));
    }

    #[test]
    fn detection_overrides_earlier_manual_wfh() {
        let (_dir, mut c) = setup();
        c.select(Action::Wfh).unwrap();

        let outcome = c.periodic_check(&detector(sees(&["CorpNet"]))).unwrap();
        assert_eq!(outcome, CheckOutcome::OfficeDetected);
        assert_eq!(c.state(), DayState::Office);
    }

    #[test]
    fn no_detection_never_sets_wfh() {
        let (_dir, mut c) = setup();
        let outcome = c.periodic_check(&detector(sees(&["neighbour"]))).unwrap();
        assert_eq!(outcome, CheckOutcome::NotDetected);
        assert_eq!(c.store().get_action(day()).unwrap(), None);
        assert_eq!(c.state(), DayState::Unset);
    }

    #[test]
    fn sensor_failure_leaves_state_untouched() {
        let (_dir, mut c) = setup();
        c.select(Action::Wfh).unwrap();

        let mut sensor = MockSensor::new();
        sensor
            .expect_visible_networks()
            .times(1)
            .returning(|| Err(AppError::SensorUnavailable("no wireless interface".into())));

        assert!(matches!(
            c.periodic_check(&detector(sensor)),
            Err(AppError::SensorUnavailable(_))
        ));
        assert_eq!(c.refresh().unwrap(), DayState::Wfh);
    }

    #[test]
    fn late_scan_result_respects_manual_office() {
        let (_dir, mut c) = setup();
        assert!(c.needs_scan().unwrap());
        // user clicks Office while the scan is still running
        c.select(Action::Office).unwrap();
        assert_eq!(c.apply_scan(true).unwrap(), CheckOutcome::AlreadyOffice);
    }

    #[test]
    fn backfill_does_not_touch_today() {
        let (_dir, mut c) = setup();
        let yesterday = day().pred_opt().unwrap();
        assert_eq!(c.select_on(yesterday, Action::Wfh).unwrap(), DayState::Wfh);
        assert_eq!(c.state(), DayState::Unset);
    }
}
