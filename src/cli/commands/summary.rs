use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::SummaryLogic;
use crate::errors::AppResult;
use crate::models::YearMonth;
use crate::ui::messages::header;
use crate::utils::date::today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { month, json, all } = cmd {
        let store = open_store(cfg)?;

        let months = match month {
            Some(m) => {
                let ym = YearMonth::parse(m)?;
                vec![(ym, SummaryLogic::month(&store, ym, *all)?)]
            }
            None => SummaryLogic::with_previous(&store, YearMonth::of(today()), *all)?,
        };

        if *json {
            let list: Vec<_> = months.iter().map(|(_, s)| s).collect();
            println!("{}", serde_json::to_string_pretty(&list)?);
            return Ok(());
        }

        for (ym, summary) in &months {
            header(format!("{} ({})", ym.short_name(), ym));
            println!("WFH days: {}", summary.wfh_count);
            println!("{}", summary.days_line(*ym));

            if let Some(entries) = &summary.entries {
                println!();
                if entries.is_empty() {
                    println!("No days recorded in {}", ym);
                }
                for e in entries {
                    println!("  {}  {}", e.date.format("%Y-%m-%d %a"), e.action.label());
                }
            }
            println!();
        }
    }
    Ok(())
}
