//! Results of finished daily games
//!
//! Only daily games are recorded. A day is recorded at most once per word
//! length, so replaying a restored finished game does not double count.

use crate::puzzle::PuzzleDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Stats file name inside the data directory
pub const STATS_FILE: &str = "stats.json";

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid stats file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub date: PuzzleDate,
    pub word_length: usize,
    pub won: bool,
    pub guess_count: usize,
    pub solution: String,
    pub reveal_vowels: bool,
    pub lifeline_used: bool,
}

/// Receiver of finished games
pub trait StatsSink {
    /// Record a result; returns false if the day was already recorded
    fn record_result(&mut self, record: GameRecord) -> bool;
}

impl StatsSink for Vec<GameRecord> {
    fn record_result(&mut self, record: GameRecord) -> bool {
        if self
            .iter()
            .any(|r| r.date == record.date && r.word_length == record.word_length)
        {
            return false;
        }
        self.push(record);
        true
    }
}

/// Aggregate numbers for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub played: usize,
    pub won: usize,
    pub current_streak: usize,
    pub max_streak: usize,
    /// Wins keyed by the number of guesses used
    pub distribution: BTreeMap<usize, usize>,
}

impl StatsSummary {
    /// Win percentage, rounded down
    #[must_use]
    pub fn win_percent(&self) -> usize {
        (self.won * 100).checked_div(self.played).unwrap_or(0)
    }

    /// Summarize records of one word length as of `today`
    ///
    /// A streak is a run of won games on consecutive days. The current
    /// streak is broken once a full day passes without a win.
    #[must_use]
    pub fn from_records(records: &[GameRecord], word_length: usize, today: PuzzleDate) -> Self {
        let mut games: Vec<&GameRecord> = records
            .iter()
            .filter(|r| r.word_length == word_length)
            .collect();
        games.sort_by_key(|r| r.date);

        let mut summary = Self::default();
        let mut streak = 0;
        let mut last_win: Option<PuzzleDate> = None;

        for game in games {
            summary.played += 1;
            if game.won {
                summary.won += 1;
                *summary.distribution.entry(game.guess_count).or_insert(0) += 1;
                streak = match last_win {
                    Some(prev) if game.date.days_since(prev) == 1 => streak + 1,
                    _ => 1,
                };
                last_win = Some(game.date);
            } else {
                streak = 0;
                last_win = None;
            }
            summary.max_streak = summary.max_streak.max(streak);
        }

        summary.current_streak = match last_win {
            Some(prev) if today.days_since(prev) <= 1 => streak,
            _ => 0,
        };
        summary
    }
}

/// Records kept as JSON in the data directory
#[derive(Debug)]
pub struct FileStats {
    path: PathBuf,
    records: Vec<GameRecord>,
}

impl FileStats {
    /// Open the stats file in `dir`, starting empty if it does not exist
    ///
    /// # Errors
    /// Returns `StatsError` if an existing file cannot be read or parsed.
    pub fn open(dir: &Path) -> Result<Self, StatsError> {
        let path = dir.join(STATS_FILE);
        let records = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StatsError::Io { path, source }),
        };
        Ok(Self { path, records })
    }

    #[must_use]
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    #[must_use]
    pub fn summary(&self, word_length: usize, today: PuzzleDate) -> StatsSummary {
        StatsSummary::from_records(&self.records, word_length, today)
    }

    fn flush(&self) -> Result<(), StatsError> {
        let io_error = |source| StatsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_error)?;
        fs::rename(&temp_path, &self.path).map_err(io_error)?;
        Ok(())
    }
}

impl StatsSink for FileStats {
    fn record_result(&mut self, record: GameRecord) -> bool {
        let date = record.date;
        if !self.records.record_result(record) {
            log::debug!("stats for {date} already recorded");
            return false;
        }
        if let Err(e) = self.flush() {
            log::warn!("could not save stats: {e}");
        }
        true
    }
}
