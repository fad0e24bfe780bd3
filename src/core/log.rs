use crate::db::WorkLogStore;
use crate::db::log::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;

/// Colour of an operation in the printed log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "set" => Colour::Green,
        "auto" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

const MAX_OP_WIDTH: usize = 40;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &WorkLogStore) -> AppResult<()> {
        let conn = store.open()?;
        let entries = load_log(&conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let target = if e.target.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", e.target)
                };
                (e.id, date, e.operation, target, e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| r.2.chars().count() + r.3.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");

        for (id, date, op, target, message) in rows {
            let mut visible = format!("{op}{target}");
            if visible.chars().count() > MAX_OP_WIDTH {
                visible = visible.chars().take(MAX_OP_WIDTH - 3).collect::<String>() + "...";
            }
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

            // only the operation word is coloured
            let split = op.len().min(visible.len());
            let (op_part, rest) = visible.split_at(split);
            let painted = color_for_operation(&op).paint(op_part);

            println!(
                "{:>id_w$}: {:<date_w$} | {}{}{} => {}",
                id, date, painted, rest, padding, message
            );
        }

        Ok(())
    }
}
