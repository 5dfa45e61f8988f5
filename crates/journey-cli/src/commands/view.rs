use std::path::{Path, PathBuf};

use clap::Args;
use journey_core::{JourneyDocument, JourneyEngine, UnitStatus};

use super::{load_config, resolve_now};

#[derive(Args)]
pub struct ViewArgs {
    /// Snapshot JSON file
    pub file: PathBuf,
    /// Instant to evaluate at (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub now: Option<String>,
    /// Print the full view as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ViewArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let placeholder = config.reveal.placeholder.clone();
    let engine = JourneyEngine::new(config);
    let doc = JourneyDocument::open(&args.file)?;
    tracing::debug!(file = %args.file.display(), "loaded snapshot");
    let view = engine.derive(doc.store().data(), resolve_now(args.now.as_deref())?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    match view.phase {
        Some(phase) => println!("Phase: {phase}"),
        None => println!("Phase: unknown (no program window)"),
    }
    if let Some(days) = view.days_until_start.filter(|d| *d > 0) {
        println!("Starts in {days} days");
    }
    println!(
        "Progress: {}/{} required, streak {} day(s)",
        view.required.completed, view.required.total, view.streak.length
    );
    for unit in &view.units {
        let marker = match unit.status {
            UnitStatus::Completed => "[x]",
            UnitStatus::Current => "[>]",
            UnitStatus::Upcoming => "[ ]",
            UnitStatus::Locked => "[-]",
        };
        println!("{marker} {} ({})", unit.display_title(&placeholder), unit.icon.name());
        for task in &unit.tasks {
            let check = if task.completion.is_complete { "x" } else { " " };
            let auto = if task.completion.is_auto_completed { " (auto)" } else { "" };
            let label = task.urgency_label.as_deref().unwrap_or("");
            println!("    [{check}] {}{auto} {label}", task.id);
        }
    }
    if let Some(next) = &view.next_action {
        println!("Next: {}", next.task_id);
    }
    for issue in &view.issues {
        eprintln!("warning: {issue}");
    }
    Ok(())
}
