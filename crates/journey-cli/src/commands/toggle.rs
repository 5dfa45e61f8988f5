use std::path::{Path, PathBuf};

use clap::Args;
use journey_core::{JourneyDocument, JourneyEngine};

use super::{load_config, resolve_now};

#[derive(Args)]
pub struct ToggleArgs {
    /// Snapshot JSON file, updated in place
    pub file: PathBuf,
    /// Task to toggle
    pub task_id: String,
    /// Set an explicit state instead of toggling
    #[arg(long)]
    pub set: Option<bool>,
    /// Instant of the write (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: ToggleArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let engine = JourneyEngine::new(load_config(config_path)?);
    let now = resolve_now(args.now.as_deref())?;
    let mut doc = JourneyDocument::open(&args.file)?;
    let snapshot = doc.store().data().clone();

    let outcome = match args.set {
        Some(target) => engine.set_task(doc.store_mut(), &snapshot, &args.task_id, target, now)?,
        None => engine.toggle_task(doc.store_mut(), &snapshot, &args.task_id, now)?,
    };
    if outcome.written {
        doc.save()?;
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
