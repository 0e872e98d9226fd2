//! Puzzle data: daily schedule, dictionaries and the calendar
//!
//! Provides embedded word lists compiled into the binary for zero-cost access.

pub mod calendar;
pub mod dictionary;
mod embedded;
mod error;
mod mode;
pub mod source;

pub use calendar::{Calendar, PuzzleDate};
pub use dictionary::{Dictionary, WordListReport, check_word_list};
pub use embedded::{clue_entries, dictionary_words};
pub use error::PuzzleError;
pub use mode::GameMode;
pub use source::{EmbeddedPuzzles, Puzzle, PuzzleSource, fallback_puzzle};
