//! Puzzle and dictionary loading errors.

use super::PuzzleDate;
use thiserror::Error;

/// Failures while loading puzzle or dictionary data
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("No {length}-letter puzzle available for {date}")]
    NoPuzzleAvailable { date: PuzzleDate, length: usize },

    #[error("Unsupported word length {0} (expected 5-7)")]
    UnsupportedLength(usize),

    #[error("No usable {0}-letter words")]
    EmptyWordList(usize),
}
