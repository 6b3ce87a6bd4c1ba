//! Top-ten table of finished games, stored as JSON in the data directory.

use crate::AppError;
use chrono::Utc;
use connect_log2_engine::FinalReport;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Format of [`Score::datetime`], always UTC.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Score {
    /// Sum of the real values left on the board.
    points: u128,
    /// Highest tile number reached.
    tile: u8,
    /// Player name.
    user: String,
    /// When the game ended, UTC.
    datetime: String,
}

impl Score {
    /// Entry for a finished game, stamped with the current UTC time.
    pub fn from_report(report: FinalReport, user: impl Into<String>) -> Self {
        Self::new(
            *report.points(),
            *report.highest_tile(),
            user.into(),
            Utc::now().format(DATETIME_FORMAT).to_string(),
        )
    }
}

/// High-score table bound to a file.
#[derive(Debug, Clone, Getters)]
pub struct HiScoreTable {
    path: PathBuf,
    scores: Vec<Score>,
}

impl HiScoreTable {
    /// Table size.
    pub const MAX_SCORES: usize = 10;

    /// Reads the table at `path`.
    ///
    /// Only the best [`Self::MAX_SCORES`] entries are kept. A missing file
    /// gives an empty table. A file that cannot be parsed is removed and also
    /// gives an empty table.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let scores = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Score>>(&content) {
                Ok(mut scores) => {
                    sort_scores(&mut scores);
                    scores.truncate(Self::MAX_SCORES);
                    debug!(count = scores.len(), "Loaded high scores");
                    scores
                }
                Err(e) => {
                    warn!(error = %e, "Corrupt high-score file, starting over");
                    if let Err(e) = std::fs::remove_file(&path) {
                        warn!(error = %e, "Could not remove corrupt high-score file");
                    }
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No high-score file yet");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not read high-score file");
                Vec::new()
            }
        };
        Self { path, scores }
    }

    /// Returns true if a game worth `points` would enter the table.
    pub fn qualifies(&self, points: u128) -> bool {
        self.scores.len() < Self::MAX_SCORES
            || self.scores.last().is_some_and(|last| points > *last.points())
    }

    /// Adds a finished game stamped with the current UTC time.
    ///
    /// Returns whether the entry made it into the table. An accepted entry
    /// is written to disk immediately.
    #[instrument(skip(self, user))]
    pub fn add_score(&mut self, report: FinalReport, user: &str) -> bool {
        self.insert(Score::from_report(report, user))
    }

    /// Inserts a prepared entry; see [`HiScoreTable::add_score`].
    #[instrument(skip(self))]
    pub fn insert(&mut self, score: Score) -> bool {
        if !self.qualifies(score.points) {
            debug!(points = %score.points, "Score did not make the table");
            return false;
        }
        info!(points = %score.points, tile = score.tile, user = %score.user, "New high score");
        self.scores.push(score);
        sort_scores(&mut self.scores);
        self.scores.truncate(Self::MAX_SCORES);
        if let Err(e) = self.store() {
            error!(error = %e, "Failed to write high scores");
        }
        true
    }

    /// Writes the table to its file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn store(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.scores)?;
        std::fs::write(&self.path, json)?;
        debug!(count = self.scores.len(), "Stored high scores");
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Highest points first; equal points keep their insertion order.
fn sort_scores(scores: &mut [Score]) {
    scores.sort_by(|a, b| b.points.cmp(&a.points));
}
