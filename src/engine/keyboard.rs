//! Keyboard letter states derived from play history
//!
//! Recomputed from scratch on demand. A letter's status is only ever
//! upgraded (`Absent` < `Present` < `Correct`), so the result does not depend
//! on the order attempts are folded in.

use super::letters::{LockedLetters, RevealedLetters};
use super::state::Attempt;
use crate::core::{LetterStatus, Word};
use rustc_hash::FxHashMap;

/// Best known status for each letter that has been seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState(FxHashMap<char, LetterStatus>);

impl KeyboardState {
    /// Status for a letter, `None` if it has never been seen
    #[must_use]
    pub fn status(&self, letter: char) -> Option<LetterStatus> {
        self.0.get(&letter.to_ascii_lowercase()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn upgrade(&mut self, letter: char, status: LetterStatus) {
        let entry = self.0.entry(letter.to_ascii_lowercase()).or_insert(status);
        if status > *entry {
            *entry = status;
        }
    }
}

/// Fold locked letters, revealed letters and every attempt into keyboard states
///
/// Locked and revealed letters seed as `Correct`; each attempt's feedback then
/// upgrades letters, never downgrading one.
#[must_use]
pub fn aggregate(
    locked: &LockedLetters,
    revealed: &RevealedLetters,
    secret: &Word,
    attempts: &[Attempt],
) -> KeyboardState {
    let mut keyboard = KeyboardState::default();

    for (_, letter) in locked.iter() {
        keyboard.upgrade(letter, LetterStatus::Correct);
    }

    for position in revealed.iter().filter(|&p| p < secret.len()) {
        keyboard.upgrade(char::from(secret.char_at(position)), LetterStatus::Correct);
    }

    for attempt in attempts {
        for (&b, &status) in attempt.word.chars().iter().zip(attempt.feedback.statuses()) {
            keyboard.upgrade(char::from(b), status);
        }
    }

    keyboard
}
