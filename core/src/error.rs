use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions must be positive")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Marked cells must be unmarked before they can be revealed")]
    InvalidMove,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Number range is empty")]
    EmptyRange,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
