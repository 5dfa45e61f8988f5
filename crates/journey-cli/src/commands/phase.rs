use std::path::Path;

use clap::Args;
use journey_core::{JourneyEngine, JourneySnapshot, ProgramWindow};

use super::{load_config, parse_date, resolve_now};

#[derive(Args)]
pub struct PhaseArgs {
    /// Program start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,
    /// Program end date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<String>,
    /// Instant to evaluate at (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: PhaseArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let engine = JourneyEngine::new(load_config(config_path)?);
    let window = ProgramWindow::new(
        parse_date(&args.start)?,
        args.end.as_deref().map(parse_date).transpose()?,
    );
    let snapshot = JourneySnapshot {
        window: Some(window),
        ..Default::default()
    };
    let now = resolve_now(args.now.as_deref())?;
    let today = engine.today(now);

    let output = serde_json::json!({
        "phase": engine.phase(&snapshot, now),
        "today": today,
        "daysUntilStart": journey_core::phase::days_until_start(today, &window),
        "countdown": journey_core::Countdown::until_start(
            now,
            &window,
            engine.config().calendar.utc_offset_minutes,
        ),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
