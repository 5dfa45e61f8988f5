use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "journey-cli", version, about = "Journey CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/journey/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the full journey view from a snapshot file
    View(commands::view::ViewArgs),
    /// Classify a date against a program window
    Phase(commands::phase::PhaseArgs),
    /// Classify a task's due-date urgency
    Urgency(commands::urgency::UrgencyArgs),
    /// Compute the streak of a set of active dates
    Streak(commands::streak::StreakArgs),
    /// Toggle a task's completion in a snapshot file
    Toggle(commands::toggle::ToggleArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("JOURNEY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config_path = cli.config;
    let result = match cli.command {
        Commands::View(args) => commands::view::run(args, config_path.as_deref()),
        Commands::Phase(args) => commands::phase::run(args, config_path.as_deref()),
        Commands::Urgency(args) => commands::urgency::run(args, config_path.as_deref()),
        Commands::Streak(args) => commands::streak::run(args, config_path.as_deref()),
        Commands::Toggle(args) => commands::toggle::run(args, config_path.as_deref()),
        Commands::Config { action } => commands::config::run(action, config_path.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
