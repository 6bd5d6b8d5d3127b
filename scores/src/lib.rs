//! Append-only log of finished games and best-time lookups.
//!
//! Each record is one JSON line, so a partially written log still yields every
//! complete record before the damage.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use randmines_core::Difficulty;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub use error::*;

mod error;

pub const SCORE_FILE: &str = "scores.jsonl";

/// Result of a won game. Fields are fixed once the record is created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    timestamp: DateTime<Utc>,
    seconds: u32,
    difficulty: Difficulty,
    random_mode: bool,
}

impl Score {
    pub fn new(
        timestamp: DateTime<Utc>,
        seconds: u32,
        difficulty: Difficulty,
        random_mode: bool,
    ) -> Self {
        Self {
            timestamp,
            seconds,
            difficulty,
            random_mode,
        }
    }

    /// Record stamped with the current time.
    pub fn now(seconds: u32, difficulty: Difficulty, random_mode: bool) -> Self {
        Self::new(Utc::now(), seconds, difficulty, random_mode)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn random_mode(&self) -> bool {
        self.random_mode
    }

    /// Whether both records were played under the same rules.
    pub fn same_category(&self, other: &Score) -> bool {
        self.difficulty == other.difficulty && self.random_mode == other.random_mode
    }
}

/// A candidate is a high score when it beats the fastest existing time, or when
/// there is nothing to beat.
pub fn is_high_score(candidate: &Score, existing: &[Score]) -> bool {
    existing
        .iter()
        .map(Score::seconds)
        .min()
        .is_none_or(|best| candidate.seconds < best)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Per-user data directory location, e.g. `~/.local/share/randmines/scores.jsonl`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "randmines").map(|dirs| dirs.data_dir().join(SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, creating the log and its directory when missing.
    ///
    /// The whole line is handed to a single write and flushed before returning. A log
    /// left ending in a torn line is terminated first so the new record starts fresh.
    pub fn append(&self, score: &Score) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(score)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;
        if ends_in_torn_line(&mut file)? {
            log::warn!("Score log {} ends in a partial line", self.path.display());
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;

        log::debug!("Appended score to {}: {}", self.path.display(), line.trim());
        Ok(())
    }

    /// Every record in the log. A missing or empty log yields no records.
    pub fn read_all(&self) -> Result<Vec<Score>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No score log at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut scores = Vec::new();
        for (number, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line?;
            if line.trim_ascii().is_empty() {
                continue;
            }

            match serde_json::from_slice(&line) {
                Ok(score) => scores.push(score),
                Err(err) => log::warn!(
                    "Skipping malformed score on line {} of {}: {}",
                    number + 1,
                    self.path.display(),
                    err
                ),
            }
        }

        Ok(scores)
    }

    /// Stores `score` and reports whether it beats every earlier record of its category.
    pub fn record(&self, score: &Score) -> Result<bool> {
        let existing: Vec<Score> = self
            .read_all()?
            .into_iter()
            .filter(|other| other.same_category(score))
            .collect();
        let high_score = is_high_score(score, &existing);

        self.append(score)?;
        if high_score {
            log::info!(
                "New best time for {} (random mode: {}): {}s",
                score.difficulty,
                score.random_mode,
                score.seconds
            );
        }
        Ok(high_score)
    }

    /// Fastest record for a difficulty and mode, if any game was recorded.
    pub fn best(&self, difficulty: Difficulty, random_mode: bool) -> Result<Option<Score>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|score| score.difficulty == difficulty && score.random_mode == random_mode)
            .min_by_key(Score::seconds))
    }
}

/// Whether a non-empty log lacks its trailing newline.
fn ends_in_torn_line(file: &mut File) -> io::Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
