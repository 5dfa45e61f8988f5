//! Injectable source of "now" plus calendar-day helpers.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// Supplies the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midnight UTC of the given date.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar date of `now` as seen from a fixed UTC offset.
///
/// Offsets outside +-24h fall back to UTC.
pub fn local_date(now: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDate {
    match FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.date_naive(),
    }
}

/// Instant at which a local calendar date begins, in UTC.
///
/// `None` when that instant falls outside the representable range.
pub fn local_midnight(date: NaiveDate, utc_offset_minutes: i32) -> Option<DateTime<Utc>> {
    let utc_midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    match FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) {
        Some(_) => Duration::try_minutes(i64::from(utc_offset_minutes))
            .and_then(|delta| utc_midnight.checked_sub_signed(delta)),
        None => Some(utc_midnight),
    }
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
