//! Countdown to program start.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::local_midnight;
use crate::model::ProgramWindow;

/// Remaining time until the program starts, split for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Countdown from `now` to local midnight of the start date; zero once
    /// the start has passed. `None` when the start instant is off the
    /// calendar.
    pub fn until_start(
        now: DateTime<Utc>,
        window: &ProgramWindow,
        utc_offset_minutes: i32,
    ) -> Option<Self> {
        let start = local_midnight(window.start_date, utc_offset_minutes)?;
        let remaining = start.signed_duration_since(now).num_seconds();
        if remaining <= 0 {
            return Some(Self::default());
        }
        Some(Self {
            days: remaining / 86_400,
            hours: (remaining % 86_400) / 3_600,
            minutes: (remaining % 3_600) / 60,
            seconds: remaining % 60,
        })
    }

    pub fn is_elapsed(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn splits_remaining_time() {
        let window = ProgramWindow::open(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        let now = Utc.with_ymd_and_hms(2025, 6, 8, 21, 29, 15).unwrap();
        let c = Countdown::until_start(now, &window, 0).unwrap();
        assert_eq!(
            c,
            Countdown {
                days: 1,
                hours: 2,
                minutes: 30,
                seconds: 45
            }
        );
        assert!(!c.is_elapsed());
    }

    #[test]
    fn respects_utc_offset() {
        let window = ProgramWindow::open(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        let now = Utc.with_ymd_and_hms(2025, 6, 9, 20, 0, 0).unwrap();
        let c = Countdown::until_start(now, &window, 120).unwrap();
        assert_eq!(
            c,
            Countdown {
                days: 0,
                hours: 2,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn start_off_the_calendar_has_no_countdown() {
        let window = ProgramWindow::open(NaiveDate::MIN);
        let now = Utc.with_ymd_and_hms(2025, 6, 9, 20, 0, 0).unwrap();
        assert_eq!(Countdown::until_start(now, &window, 120), None);
    }

    #[test]
    fn zero_after_start() {
        let window = ProgramWindow::open(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        let now = Utc.with_ymd_and_hms(2025, 6, 11, 0, 0, 0).unwrap();
        assert!(Countdown::until_start(now, &window, 0).unwrap().is_elapsed());
    }
}
