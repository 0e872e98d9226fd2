//! Guess submission errors.

use thiserror::Error;

/// User-correctable problems with a submitted guess
///
/// None of these are recorded as attempts, and none of them end the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// Some positions were left empty after overlaying locked letters
    #[error("Not enough letters (missing positions {missing:?})")]
    IncompleteGuess { missing: Vec<usize> },

    /// More letters were typed than there are open positions
    #[error("Too many letters: {typed} typed for {open} open positions")]
    TooManyLetters { typed: usize, open: usize },

    /// Typed input contained something other than letters or blanks
    #[error("Invalid character {0:?} in guess")]
    InvalidCharacter(char),

    /// The completed guess is not a known word
    #[error("{} is not in the word list", .0.to_uppercase())]
    NotInDictionary(String),

    /// The game already reached a terminal state
    #[error("The game is already over")]
    GameOver,
}

impl GuessError {
    /// Short message suitable for a transient notice
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match self {
            Self::IncompleteGuess { .. } => "Not enough letters",
            Self::TooManyLetters { .. } => "Too many letters",
            Self::InvalidCharacter(_) => "Letters only",
            Self::NotInDictionary(_) => "Not in word list",
            Self::GameOver => "Game over",
        }
    }
}
