use super::Action;
use serde::Serialize;
use std::fmt;

/// Observable state of the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DayState {
    #[default]
    Unset,
    #[serde(rename = "WFH")]
    Wfh,
    Office,
}

impl DayState {
    pub fn is_office(&self) -> bool {
        matches!(self, DayState::Office)
    }
}

impl From<Option<Action>> for DayState {
    fn from(action: Option<Action>) -> Self {
        match action {
            None => DayState::Unset,
            Some(Action::Wfh) => DayState::Wfh,
            Some(Action::Office) => DayState::Office,
        }
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayState::Unset => f.write_str("not set"),
            DayState::Wfh => f.write_str("WFH"),
            DayState::Office => f.write_str("Office"),
        }
    }
}
