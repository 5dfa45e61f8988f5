//! Consecutive-day engagement streaks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak state as of a given day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    /// Consecutive active days ending today or yesterday
    pub length: u32,
    pub is_active_today: bool,
    /// Longest run anywhere in the log
    pub longest: u32,
}

/// Sorted, one-entry-per-day copy of the log.
fn normalize(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut days = dates.to_vec();
    days.sort_unstable();
    days.dedup();
    days
}

fn is_next_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier.succ_opt() == Some(later)
}

/// Compute the streak as of `today`.
///
/// The streak survives until the end of the day after the last activity; a
/// last active day before yesterday resets it to zero. Dates after `today`
/// are ignored.
pub fn compute(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let days: Vec<NaiveDate> = normalize(dates)
        .into_iter()
        .filter(|d| *d <= today)
        .collect();

    let longest = longest_run(&days);
    let Some(&last) = days.last() else {
        return StreakSummary::default();
    };

    let is_active_today = last == today;
    let yesterday = today.pred_opt().unwrap_or(today);
    if last < yesterday {
        return StreakSummary {
            length: 0,
            is_active_today: false,
            longest,
        };
    }

    let mut length = 1u32;
    for pair in days.windows(2).rev() {
        if is_next_day(pair[0], pair[1]) {
            length += 1;
        } else {
            break;
        }
    }

    StreakSummary {
        length,
        is_active_today,
        longest,
    }
}

fn longest_run(days: &[NaiveDate]) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;
    for &day in days {
        run = match previous {
            Some(prev) if is_next_day(prev, day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }
    best
}
