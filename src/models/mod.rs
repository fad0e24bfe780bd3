pub mod action;
pub mod day_state;
pub mod entry;
pub mod year_month;

pub use action::Action;
pub use day_state::DayState;
pub use entry::WorkLogEntry;
pub use year_month::YearMonth;
