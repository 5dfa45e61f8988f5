//! Due-date urgency classification.
//!
//! A task's due rule is "N days before program start". The distance to that
//! date is measured in whole calendar days and bucketed into tiers used for
//! styling precedence.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Urgency tier. Ordered by precedence: `Overdue` is the greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    None,
    Comfortable,
    DueThisWeek,
    DueSoon,
    DueTomorrow,
    DueToday,
    Overdue,
}

/// Tier boundaries in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    /// Upper bound (inclusive) of `DueSoon`
    pub soon_max_days: i64,
    /// Upper bound (inclusive) of `DueThisWeek`
    pub week_max_days: i64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            soon_max_days: 3,
            week_max_days: 7,
        }
    }
}

impl UrgencyThresholds {
    /// Smallest `soon_max_days` that leaves the `DueSoon` tier non-empty.
    pub const MIN_SOON_MAX_DAYS: i64 = 2;

    /// True when every tier between `DueTomorrow` and `Comfortable` is reachable.
    pub fn is_valid(&self) -> bool {
        self.soon_max_days >= Self::MIN_SOON_MAX_DAYS && self.week_max_days > self.soon_max_days
    }

    /// Nearest valid thresholds: `soon >= 2` and `week > soon`.
    pub fn clamped(self) -> Self {
        let soon_max_days = self.soon_max_days.max(Self::MIN_SOON_MAX_DAYS);
        Self {
            soon_max_days,
            week_max_days: self.week_max_days.max(soon_max_days.saturating_add(1)),
        }
    }
}

/// Classified urgency of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Urgency {
    pub tier: UrgencyTier,
    pub due_date: Option<NaiveDate>,
    pub days_until_due: Option<i64>,
}

impl Urgency {
    pub fn none() -> Self {
        Self {
            tier: UrgencyTier::None,
            due_date: None,
            days_until_due: None,
        }
    }

    /// Display label, derived from the tier and the day count.
    pub fn label(&self) -> Option<String> {
        let days = self.days_until_due?;
        let plural = |n: i64| if n == 1 { "day" } else { "days" };
        match self.tier {
            UrgencyTier::None => None,
            UrgencyTier::Overdue => {
                let late = days.unsigned_abs();
                Some(format!("Overdue by {} {}", late, plural(late as i64)))
            }
            UrgencyTier::DueToday => Some("Due today".to_string()),
            UrgencyTier::DueTomorrow => Some("Due tomorrow".to_string()),
            UrgencyTier::DueSoon | UrgencyTier::DueThisWeek | UrgencyTier::Comfortable => {
                Some(format!("Due in {} {}", days, plural(days)))
            }
        }
    }
}

/// Absolute due date: `start - offset days`. `None` when it leaves the calendar.
pub fn due_date(start: NaiveDate, due_days_offset: i64) -> Option<NaiveDate> {
    Duration::try_days(due_days_offset).and_then(|delta| start.checked_sub_signed(delta))
}

fn tier_for(days_until_due: i64, thresholds: UrgencyThresholds) -> UrgencyTier {
    match days_until_due {
        d if d < 0 => UrgencyTier::Overdue,
        0 => UrgencyTier::DueToday,
        1 => UrgencyTier::DueTomorrow,
        d if d <= thresholds.soon_max_days => UrgencyTier::DueSoon,
        d if d <= thresholds.week_max_days => UrgencyTier::DueThisWeek,
        _ => UrgencyTier::Comfortable,
    }
}

/// Classify a task's urgency.
///
/// Complete tasks, tasks without a due rule and due dates that cannot be
/// computed all classify as `None`; they are never reported overdue.
pub fn classify(
    due_days_offset: Option<i64>,
    start: NaiveDate,
    today: NaiveDate,
    is_complete: bool,
    thresholds: UrgencyThresholds,
) -> Urgency {
    if is_complete {
        return Urgency::none();
    }
    let Some(due) = due_days_offset.and_then(|offset| due_date(start, offset)) else {
        return Urgency::none();
    };
    let days_until_due = crate::clock::days_between(today, due);
    Urgency {
        tier: tier_for(days_until_due, thresholds),
        due_date: Some(due),
        days_until_due: Some(days_until_due),
    }
}
