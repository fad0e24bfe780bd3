use serde::Serialize;
use std::fmt;

/// The daily work-location choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    #[serde(rename = "WFH")]
    Wfh,
    Office,
}

impl Action {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Action::Wfh => "WFH",
            Action::Office => "Office",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "WFH" => Some(Action::Wfh),
            "Office" => Some(Action::Office),
            _ => None,
        }
    }

    /// Helper: convert a code typed on the command line (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "wfh" | "home" | "remote" | "h" | "r" => Some(Action::Wfh),
            "office" | "o" => Some(Action::Office),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Wfh => "Home",
            Action::Office => "Office",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
