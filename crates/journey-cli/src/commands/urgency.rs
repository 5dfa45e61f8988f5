use std::path::Path;

use clap::Args;
use journey_core::urgency;

use super::{load_config, parse_date, resolve_now};

#[derive(Args)]
pub struct UrgencyArgs {
    /// Program start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// Due N days before start (negative for after)
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i64>,
    /// Treat the task as already complete
    #[arg(long)]
    pub complete: bool,
    /// Instant to evaluate at (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(
    args: UrgencyArgs,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let now = resolve_now(args.now.as_deref())?;
    let today = journey_core::clock::local_date(now, config.calendar.utc_offset_minutes);
    let result = urgency::classify(
        args.offset,
        parse_date(&args.start)?,
        today,
        args.complete,
        config.urgency_thresholds(),
    );

    let output = serde_json::json!({
        "tier": result.tier,
        "dueDate": result.due_date,
        "daysUntilDue": result.days_until_due,
        "label": result.label(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
