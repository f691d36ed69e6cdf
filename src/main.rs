//! scrobble-sweep - resumable Last.fm scrobble removal
//!
//! CLI over the sweeper library: pick up a saved job or start a fresh
//! one, then process library pages until done.

use clap::Parser;
use scrobble_sweep::{Config, RunOutcome, Sweeper};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sweep", version, about = "Remove recent Last.fm scrobbles in resumable batches")]
struct Cli {
    /// Number of recent scrobbles to remove; prompts if omitted and
    /// there is no job to resume
    count: Option<u64>,

    /// Path to the YAML config file (default: sweep.yaml if present)
    #[arg(short, long, env = "SWEEP_CONFIG")]
    config: Option<PathBuf>,

    /// Walk the pages and report without deleting anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match run(Cli::parse()).await {
        Ok(outcome) => match outcome {
            RunOutcome::Stalled { completed, total } => {
                eprintln!(
                    "Stopped at {}/{}: no removable scrobbles left on the page",
                    completed, total
                );
                ExitCode::FAILURE
            }
            RunOutcome::Completed { total } => {
                eprintln!("Removed {} scrobbles", total);
                ExitCode::SUCCESS
            }
            _ => ExitCode::SUCCESS,
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> scrobble_sweep::Result<RunOutcome> {
    let mut config = Config::load(cli.config.as_deref()).await?;
    if cli.dry_run {
        config.sweep.dry_run = true;
    }

    let sweeper = Sweeper::new(config)?;
    sweeper.run(cli.count).await
}
