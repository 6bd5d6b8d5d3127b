use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Score log I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Could not encode score record")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
