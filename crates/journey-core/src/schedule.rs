//! Unit scheduling: absolute date or day offset from program start.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::ProgramWindow;

/// When a unit takes place.
///
/// Serialized as `{"date": "2025-06-10"}`, `{"offset": 2}` or `"unscheduled"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSchedule {
    /// Fixed calendar date
    Date(NaiveDate),
    /// Days after the program start; 0 is the first day
    Offset(i64),
    #[default]
    Unscheduled,
}

impl UnitSchedule {
    /// Calendar date of the unit, if it has one that fits the calendar.
    pub fn resolve(&self, window: &ProgramWindow) -> Option<NaiveDate> {
        match *self {
            UnitSchedule::Date(date) => Some(date),
            UnitSchedule::Offset(days) => Duration::try_days(days)
                .and_then(|delta| window.start_date.checked_add_signed(delta)),
            UnitSchedule::Unscheduled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn resolves_offsets_against_start() {
        let window = ProgramWindow::open(d(2025, 6, 10));
        assert_eq!(UnitSchedule::Offset(0).resolve(&window), Some(d(2025, 6, 10)));
        assert_eq!(UnitSchedule::Offset(3).resolve(&window), Some(d(2025, 6, 13)));
        assert_eq!(UnitSchedule::Offset(-1).resolve(&window), Some(d(2025, 6, 9)));
        assert_eq!(UnitSchedule::Date(d(2025, 7, 1)).resolve(&window), Some(d(2025, 7, 1)));
        assert_eq!(UnitSchedule::Unscheduled.resolve(&window), None);
    }

    #[test]
    fn overflowing_offset_has_no_date() {
        let window = ProgramWindow::open(d(2025, 6, 10));
        assert_eq!(UnitSchedule::Offset(i64::MAX).resolve(&window), None);
        assert_eq!(UnitSchedule::Offset(10_000_000_000).resolve(&window), None);
    }

    #[test]
    fn serde_shapes() {
        let json = serde_json::to_string(&UnitSchedule::Offset(2)).unwrap();
        assert_eq!(json, r#"{"offset":2}"#);
        let parsed: UnitSchedule = serde_json::from_str(r#""unscheduled""#).unwrap();
        assert_eq!(parsed, UnitSchedule::Unscheduled);
        let parsed: UnitSchedule = serde_json::from_str(r#"{"date":"2025-06-10"}"#).unwrap();
        assert_eq!(parsed, UnitSchedule::Date(d(2025, 6, 10)));
    }
}
