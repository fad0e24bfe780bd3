use crate::db::store::parse_date;
use crate::errors::AppResult;
use ansi_term::Colour::{Cyan, Green, Yellow};
use ansi_term::Style;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Counters shown by `db --info`.
#[derive(Debug, Default)]
pub struct DbStats {
    pub file_size: u64,
    pub total_days: i64,
    pub wfh_days: i64,
    pub office_days: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn collect(conn: &Connection, db_path: &str) -> AppResult<DbStats> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let (total_days, wfh_days, office_days): (i64, i64, i64) = conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(action = 'WFH'), 0),
                COALESCE(SUM(action = 'Office'), 0)
         FROM work_log",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let first_date: Option<String> = conn
        .query_row("SELECT MIN(date) FROM work_log", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last_date: Option<String> = conn
        .query_row("SELECT MAX(date) FROM work_log", [], |row| row.get(0))
        .optional()?
        .flatten();

    Ok(DbStats {
        file_size,
        total_days,
        wfh_days,
        office_days,
        first_date,
        last_date,
    })
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    let stats = collect(conn, db_path)?;
    let label = |s: &str| Cyan.paint(format!("• {s}:")).to_string();
    let dim = Style::new().dimmed().paint("--").to_string();

    println!();
    println!("{} {}", label("File"), Yellow.paint(db_path));
    println!(
        "{} {:.2} KB",
        label("Size"),
        stats.file_size as f64 / 1024.0
    );
    println!("{} {}", label("Recorded days"), Green.paint(stats.total_days.to_string()));
    println!("    WFH:    {}", stats.wfh_days);
    println!("    Office: {}", stats.office_days);

    println!("{}", label("Date range"));
    println!("    from: {}", stats.first_date.clone().unwrap_or_else(|| dim.clone()));
    println!("    to:   {}", stats.last_date.clone().unwrap_or_else(|| dim.clone()));

    if let (Some(f), Some(l)) = (&stats.first_date, &stats.last_date) {
        let span = (parse_date(l)? - parse_date(f)?).num_days() + 1;
        let coverage = stats.total_days as f64 * 100.0 / span as f64;
        println!("{} {:.1}% of calendar days", label("Coverage"), coverage);
    }

    println!();
    Ok(())
}
