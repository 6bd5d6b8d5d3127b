use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use randmines_scores::ScoreStore;

mod placement;
mod scores;
mod simulate;

#[derive(Parser, Debug)]
#[command(version, about = "Random Mines engine tools", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Score log to read and write, defaults to the per-user data directory
    #[arg(long, global = true)]
    scores: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game headlessly with a simple deducing bot
    Simulate(simulate::SimulateArgs),
    /// Inspect or extend the score log
    #[command(subcommand)]
    Scores(scores::ScoresCommand),
    /// Check moves of the ascending number puzzle
    #[command(subcommand)]
    Placement(placement::PlacementCommand),
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();
    log::debug!("{:?}", args);

    let scores_path = args.scores;
    let store = move || score_store(scores_path);

    match args.command {
        Command::Simulate(simulate_args) => simulate::run(simulate_args, store),
        Command::Scores(command) => scores::run(command, store()?),
        Command::Placement(command) => placement::run(command),
    }
}

fn score_store(path: Option<PathBuf>) -> Result<ScoreStore> {
    let path = path
        .or_else(ScoreStore::default_path)
        .context("Could not find a data directory for the score log, pass --scores")?;
    log::debug!("Score log: {}", path.display());
    Ok(ScoreStore::new(path))
}
