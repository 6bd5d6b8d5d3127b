use anyhow::Result;
use clap::Subcommand;
use randmines_core::Difficulty;
use randmines_scores::{Score, ScoreStore};

#[derive(Subcommand, Debug)]
pub enum ScoresCommand {
    /// List recorded games, oldest first
    List {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Show the best time for a difficulty
    Best {
        #[arg(short, long)]
        difficulty: Difficulty,
        #[arg(short, long)]
        random_mode: bool,
    },
    /// Record a finished game and report whether it is a new best time
    Add {
        #[arg(long)]
        seconds: u32,
        #[arg(short, long)]
        difficulty: Difficulty,
        #[arg(short, long)]
        random_mode: bool,
    },
}

pub fn run(command: ScoresCommand, store: ScoreStore) -> Result<()> {
    match command {
        ScoresCommand::List { difficulty } => {
            let scores = store.read_all()?;
            let shown: Vec<_> = scores
                .iter()
                .filter(|score| difficulty.is_none_or(|d| score.difficulty() == d))
                .collect();
            if shown.is_empty() {
                println!("No games recorded in {}", store.path().display());
            }
            for score in shown {
                println!("{}", describe(score));
            }
        }
        ScoresCommand::Best {
            difficulty,
            random_mode,
        } => match store.best(difficulty, random_mode)? {
            Some(best) => println!("{}", describe(&best)),
            None => println!("No {difficulty} games recorded yet"),
        },
        ScoresCommand::Add {
            seconds,
            difficulty,
            random_mode,
        } => {
            let score = Score::now(seconds, difficulty, random_mode);
            if store.record(&score)? {
                println!("New best time: {seconds}s on {difficulty}");
            } else {
                println!("Recorded {seconds}s on {difficulty}");
            }
        }
    }
    Ok(())
}

fn describe(score: &Score) -> String {
    format!(
        "{}  {:<6}  {:>5}s{}",
        score.timestamp().format("%Y-%m-%d %H:%M:%S"),
        score.difficulty().as_str(),
        score.seconds(),
        if score.random_mode() { "  random" } else { "" }
    )
}
