//! How the current puzzle was chosen

use super::PuzzleDate;
use std::fmt;

/// Puzzle selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Today's scheduled puzzle
    #[default]
    Daily,
    /// A random puzzle, not tied to any day
    Random,
    /// A past day's puzzle
    Archive(PuzzleDate),
}

impl GameMode {
    /// Only today's daily game is saved, counted in stats, and restored
    #[must_use]
    pub const fn is_persistent(self) -> bool {
        matches!(self, Self::Daily)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Random => write!(f, "random"),
            Self::Archive(date) => write!(f, "archive {date}"),
        }
    }
}
