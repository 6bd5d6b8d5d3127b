use std::time::Instant;

use anyhow::{Result, bail};
use randmines_core::*;
use randmines_scores::{Score, ScoreStore};

#[derive(clap::Args, Debug)]
pub struct SimulateArgs {
    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Reshuffle unflagged mines after every safe move
    #[arg(short, long)]
    random_mode: bool,

    /// Store a won game in the score log
    #[arg(long)]
    record: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Move {
    Reveal(CellIndex),
    Flag(CellIndex),
}

pub fn run(args: SimulateArgs, store: impl FnOnce() -> Result<ScoreStore>) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "Simulating {} game, random mode: {}, seed: {}",
        args.difficulty,
        args.random_mode,
        seed
    );

    let mut board = MinesBoard::new(args.difficulty.config(), args.random_mode, seed)?;
    let mut guesses = RandomNumberGenerator::new(seed.wrapping_add(1), 0..=u32::MAX)?;
    let started = Instant::now();
    let mut moves = 0u32;

    let outcome = loop {
        let next = match deduce(&board) {
            Some(next) => next,
            None => Move::Reveal(guess(&board, &mut guesses)?),
        };
        moves += 1;
        log::debug!("Move {}: {:?}", moves, next);

        match next {
            Move::Flag(index) => {
                board.toggle_flag(index)?;
            }
            Move::Reveal(index) => match board.play(index)? {
                RevealOutcome::NoChange | RevealOutcome::Revealed => {}
                outcome => break outcome,
            },
        }
    };

    let seconds = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);
    let safe = board.total_cells() - usize::from(board.total_mines());
    println!(
        "{}: {} moves, {}/{} safe cells revealed, {} flags, {}s",
        if outcome == RevealOutcome::Won { "Won" } else { "Lost" },
        moves,
        board.revealed_count().min(safe),
        safe,
        board.flags(),
        seconds
    );

    if args.record && outcome == RevealOutcome::Won {
        let score = Score::now(seconds, args.difficulty, args.random_mode);
        if store()?.record(&score)? {
            println!("New best time!");
        }
    }

    Ok(())
}

/// Finds a move that follows from a revealed count alone.
fn deduce(board: &MinesBoard) -> Option<Move> {
    for index in 0..board.total_cells() {
        let CellView::Revealed(count) = board.cell_at(index) else {
            continue;
        };
        if count == 0 {
            continue;
        }

        let neighbors: Vec<_> = board.neighbors(index).ok()?.collect();
        let flagged = neighbors
            .iter()
            .filter(|&&pos| board.cell_at(pos) == CellView::Flagged)
            .count();
        let Some(&hidden) = neighbors
            .iter()
            .find(|&&pos| board.cell_at(pos) == CellView::Hidden)
        else {
            continue;
        };
        let hidden_count = neighbors
            .iter()
            .filter(|&&pos| board.cell_at(pos) == CellView::Hidden)
            .count();

        if usize::from(count) == flagged {
            return Some(Move::Reveal(hidden));
        }
        if usize::from(count) == flagged + hidden_count {
            return Some(Move::Flag(hidden));
        }
    }
    None
}

fn guess(board: &MinesBoard, guesses: &mut RandomNumberGenerator) -> Result<CellIndex> {
    let hidden: Vec<_> = (0..board.total_cells())
        .filter(|&index| board.cell_at(index) == CellView::Hidden)
        .collect();
    if hidden.is_empty() {
        bail!("No hidden cell left to guess");
    }
    Ok(hidden[guesses.generate() as usize % hidden.len()])
}
