//! Puzzle game engine
//!
//! - `state`: the attempt/win-loss state machine
//! - `reveal`: pre-revealed vowels and the lifeline
//! - `keyboard`: per-letter display states derived from history
//! - `policy`: how many guesses a puzzle allows

mod error;
pub mod keyboard;
mod letters;
pub mod policy;
pub mod reveal;
mod state;

pub use error::GuessError;
pub use keyboard::{KeyboardState, aggregate};
pub use letters::{LockedLetters, RevealedLetters};
pub use policy::GuessPolicy;
pub use reveal::{RevealSettings, VowelSelection, compute_initial_locks};
pub use state::{Attempt, GameState, GameStatus, Transition};
pub(crate) use state::StateParts;

use rustc_hash::FxHashSet;

/// Set of words accepted as guesses
pub trait Lexicon {
    /// Check a lowercase word
    fn contains(&self, word: &str) -> bool;
}

impl Lexicon for FxHashSet<String> {
    fn contains(&self, word: &str) -> bool {
        std::collections::HashSet::contains(self, word)
    }
}

impl Lexicon for [&str] {
    fn contains(&self, word: &str) -> bool {
        self.iter().any(|w| w.eq_ignore_ascii_case(word))
    }
}
