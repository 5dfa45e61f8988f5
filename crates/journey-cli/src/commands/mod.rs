pub mod config;
pub mod phase;
pub mod streak;
pub mod toggle;
pub mod urgency;
pub mod view;

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use journey_core::{Clock, Config, FixedClock, SystemClock};

/// Load the config from an explicit path, or the default location.
pub fn load_config(path: Option<&Path>) -> journey_core::error::Result<Config> {
    match path {
        Some(p) if p.exists() => Ok(Config::load_from(p)?),
        Some(_) => Ok(Config::default()),
        None => Ok(Config::load_or_default()),
    }
}

/// Parse `--now` as RFC 3339 or a bare date (midnight UTC); default is the wall clock.
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let Some(raw) = now else {
        return Ok(SystemClock.now());
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = parse_date(raw)?;
    Ok(FixedClock::at_date(date).now())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{raw}': {e}").into())
}
