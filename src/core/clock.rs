use chrono::NaiveDate;

/// Source of "today" for the controller, so tests can pin the date.
pub trait Clock: Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the machine.
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        crate::utils::date::today()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
