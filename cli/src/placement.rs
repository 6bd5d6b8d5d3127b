use std::str::FromStr;

use anyhow::{Result, ensure};
use clap::Subcommand;
use randmines_core::{AscendingPlacement, PlacementRule};

/// Comma separated slots, `_` or `0` for an empty one, e.g. `10,_,_,80`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Positions(Vec<Option<u32>>);

impl FromStr for Positions {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .map(|slot| match slot {
                "" | "_" | "0" => Ok(None),
                value => value
                    .parse()
                    .map(Some)
                    .map_err(|err| format!("invalid slot {value:?}: {err}")),
            })
            .collect::<std::result::Result<_, _>>()
            .map(Positions)
    }
}

#[derive(Subcommand, Debug)]
pub enum PlacementCommand {
    /// Check whether a value may go into a slot
    Check {
        #[arg(long)]
        positions: Positions,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        value: u32,
    },
    /// Check whether a drawn value still fits anywhere
    Next {
        #[arg(long)]
        positions: Positions,
        #[arg(long)]
        value: u32,
    },
}

pub fn run(command: PlacementCommand) -> Result<()> {
    let rule = AscendingPlacement;
    match command {
        PlacementCommand::Check {
            positions,
            index,
            value,
        } => {
            ensure!(
                index < positions.0.len(),
                "Slot {index} is outside the {} slots given",
                positions.0.len()
            );
            ensure!(positions.0[index].is_none(), "Slot {index} is already taken");
            let valid = rule.is_valid_placement(&positions.0, index, value);
            println!("{}", if valid { "valid" } else { "invalid" });
        }
        PlacementCommand::Next { positions, value } => {
            let possible = rule.can_place_next(&positions.0, value);
            println!("{}", if possible { "placeable" } else { "stuck" });
        }
    }
    Ok(())
}
