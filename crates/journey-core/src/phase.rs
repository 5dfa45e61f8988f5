//! Temporal classifier: where "today" sits relative to the program window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ProgramWindow;

/// Global program phase. Ordered: `Before < During < After`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Before,
    During,
    After,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "BEFORE",
            Phase::During => "DURING",
            Phase::After => "AFTER",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `today` against the window. The end date is inclusive; an open
/// window never reaches `After`.
pub fn classify(today: NaiveDate, window: &ProgramWindow) -> Phase {
    if today < window.start_date {
        return Phase::Before;
    }
    match window.end_date {
        Some(end) if today > end => Phase::After,
        _ => Phase::During,
    }
}

/// Whole days until the program starts (negative once started).
pub fn days_until_start(today: NaiveDate, window: &ProgramWindow) -> i64 {
    crate::clock::days_between(today, window.start_date)
}
