use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` argument, falling back to today when absent.
pub fn resolve_date(arg: Option<&str>) -> AppResult<NaiveDate> {
    match arg {
        None => Ok(today()),
        Some(s) => parse_date(s).ok_or_else(|| AppError::MalformedDate(s.to_string())),
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Render day numbers the way the summary lines show them: `1, 4, 10`.
pub fn join_days(days: &[u32]) -> String {
    days.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
