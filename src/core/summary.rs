use crate::db::WorkLogStore;
use crate::errors::AppResult;
use crate::models::{Action, WorkLogEntry, YearMonth};
use crate::utils::date::join_days;
use serde::Serialize;

/// Monthly WFH view shown by `status` and `summary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub wfh_count: u32,
    pub wfh_days: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<WorkLogEntry>>,
}

impl MonthSummary {
    /// `Mar: 1, 4, 10`
    pub fn days_line(&self, ym: YearMonth) -> String {
        format!("{}: {}", ym.short_name(), join_days(&self.wfh_days))
    }
}

pub struct SummaryLogic;

impl SummaryLogic {
    pub fn month(store: &WorkLogStore, ym: YearMonth, with_entries: bool) -> AppResult<MonthSummary> {
        let entries = if with_entries {
            Some(store.entries_by_month(ym)?)
        } else {
            None
        };

        Ok(MonthSummary {
            month: ym.key(),
            wfh_count: store.count_by_month(ym, Action::Wfh)?,
            wfh_days: store.days_by_month(ym, Action::Wfh)?,
            entries,
        })
    }

    /// Given month and the one before, most recent first.
    pub fn with_previous(
        store: &WorkLogStore,
        ym: YearMonth,
        with_entries: bool,
    ) -> AppResult<Vec<(YearMonth, MonthSummary)>> {
        let prev = ym.previous();
        Ok(vec![
            (ym, Self::month(store, ym, with_entries)?),
            (prev, Self::month(store, prev, with_entries)?),
        ])
    }
}
