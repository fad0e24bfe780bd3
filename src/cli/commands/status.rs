use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::clock::LocalClock;
use crate::core::controller::LocationController;
use crate::core::summary::SummaryLogic;
use crate::errors::AppResult;
use crate::models::YearMonth;
use ansi_term::Colour::Green;
use ansi_term::Style;

/// Handle the `status` command: what the desktop widget used to show.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut controller = LocationController::new(open_store(cfg)?, Box::new(LocalClock));
    let state = controller.refresh()?;
    let today = controller.today();
    let this_month = YearMonth::of(today);

    let months = SummaryLogic::with_previous(controller.store(), this_month, false)?;

    println!(
        "{} {}",
        Style::new().bold().paint(format!("Today ({today}):")),
        Green.bold().paint(state.to_string())
    );
    println!(
        "WFH days {}: {}",
        this_month.short_name(),
        months[0].1.wfh_count
    );
    for (ym, summary) in &months {
        println!("  {}", summary.days_line(*ym));
    }
    Ok(())
}
