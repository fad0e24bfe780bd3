//! Daily action store over the `work_log` table.
//!
//! The store only remembers where the database lives; each operation opens
//! its own connection and closes it when done.

use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use crate::models::{Action, WorkLogEntry, YearMonth};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct WorkLogStore {
    path: PathBuf,
}

impl WorkLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection to the backing file.
    pub fn open(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Create the schema if missing. Idempotent.
    pub fn init_schema(&self) -> AppResult<()> {
        let conn = self.open()?;
        init_db(&conn)
    }

    /// Insert the action for `date`, or overwrite the one already there.
    pub fn upsert(&self, date: NaiveDate, action: Action) -> AppResult<()> {
        let conn = self.open()?;
        upsert_on(&conn, date, action)
    }

    pub fn get_action(&self, date: NaiveDate) -> AppResult<Option<Action>> {
        let conn = self.open()?;
        get_action_on(&conn, date)
    }

    pub fn count_by_month(&self, ym: YearMonth, action: Action) -> AppResult<u32> {
        let conn = self.open()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM work_log
             WHERE action = ?1 AND strftime('%Y-%m', date) = ?2",
            params![action.to_db_str(), ym.key()],
            |row| row.get(0),
        )?;
        Ok(count as u32)
    }

    /// Day-of-month of every matching entry, ascending.
    pub fn days_by_month(&self, ym: YearMonth, action: Action) -> AppResult<Vec<u32>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT date FROM work_log
             WHERE action = ?1 AND strftime('%Y-%m', date) = ?2
             ORDER BY date ASC",
        )?;

        let rows = stmt.query_map(params![action.to_db_str(), ym.key()], |row| {
            row.get::<_, String>(0)
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(parse_date(&r?)?.day());
        }
        Ok(out)
    }

    /// Every entry of the month, in date order.
    pub fn entries_by_month(&self, ym: YearMonth) -> AppResult<Vec<WorkLogEntry>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT date, action FROM work_log
             WHERE strftime('%Y-%m', date) = ?1
             ORDER BY date ASC",
        )?;

        let rows = stmt.query_map([ym.key()], map_entry)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

/// Upsert on an already open connection, so callers can audit in the same
/// session.
pub fn upsert_on(conn: &Connection, date: NaiveDate, action: Action) -> AppResult<()> {
    conn.execute(
        "INSERT INTO work_log (date, action) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET action = excluded.action",
        params![date.format(DATE_FMT).to_string(), action.to_db_str()],
    )?;
    Ok(())
}

pub fn get_action_on(conn: &Connection, date: NaiveDate) -> AppResult<Option<Action>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT action FROM work_log WHERE date = ?1",
            [date.format(DATE_FMT).to_string()],
            |row| row.get(0),
        )
        .optional()?;

    // Unknown values written by hand are treated as "not set".
    Ok(raw.as_deref().and_then(Action::from_db_str))
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| AppError::MalformedDate(s.to_string()))
}

fn map_entry(row: &Row) -> rusqlite::Result<WorkLogEntry> {
    let date_str: String = row.get("date")?;
    let action_str: String = row.get("action")?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::MalformedDate(date_str.clone())),
        )
    })?;

    let action = Action::from_db_str(&action_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidAction(action_str.clone())),
        )
    })?;

    Ok(WorkLogEntry { date, action })
}
