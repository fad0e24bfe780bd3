//! Row models for the `work_log` and `log` tables.

use super::Action;
use chrono::NaiveDate;
use serde::Serialize;

/// One recorded day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkLogEntry {
    pub date: NaiveDate,
    pub action: Action,
}

impl WorkLogEntry {
    pub fn new(date: NaiveDate, action: Action) -> Self {
        Self { date, action }
    }
}

/// One row of the internal audit log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}
