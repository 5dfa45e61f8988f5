use std::path::Path;

use clap::Args;
use journey_core::streak;

use super::{load_config, parse_date, resolve_now};

#[derive(Args)]
pub struct StreakArgs {
    /// Active dates (YYYY-MM-DD), any order
    pub dates: Vec<String>,
    /// Instant to evaluate at (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: StreakArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let dates = args
        .dates
        .iter()
        .map(|raw| parse_date(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let now = resolve_now(args.now.as_deref())?;
    let today = journey_core::clock::local_date(now, config.calendar.utc_offset_minutes);

    let summary = streak::compute(&dates, today);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
