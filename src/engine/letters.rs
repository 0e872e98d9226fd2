//! Locked and revealed letter bookkeeping

use crate::core::Word;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Positions whose letter is fixed, keyed by position
///
/// Only ever grows. A position, once locked, keeps its letter for the rest of
/// the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockedLetters(BTreeMap<usize, char>);

impl LockedLetters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock every position of `word`
    #[must_use]
    pub fn complete(word: &Word) -> Self {
        Self(
            word.chars()
                .iter()
                .enumerate()
                .map(|(i, &b)| (i, char::from(b)))
                .collect(),
        )
    }

    /// Lock `letter` at `position`
    ///
    /// Returns true if the position was newly locked. Re-locking with the same
    /// letter is a no-op; a conflicting letter is refused and the original
    /// lock stays.
    pub fn lock(&mut self, position: usize, letter: char) -> bool {
        let letter = letter.to_ascii_lowercase();
        match self.0.get(&position) {
            None => {
                self.0.insert(position, letter);
                true
            }
            Some(&existing) => {
                if existing != letter {
                    log::warn!(
                        "refusing to relock position {position} from {existing:?} to {letter:?}"
                    );
                }
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<char> {
        self.0.get(&position).copied()
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.0.contains_key(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every position of a word of `length` letters is locked
    #[must_use]
    pub fn covers(&self, length: usize) -> bool {
        (0..length).all(|i| self.0.contains_key(&i))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.0.iter().map(|(&pos, &letter)| (pos, letter))
    }
}

impl FromIterator<(usize, char)> for LockedLetters {
    fn from_iter<I: IntoIterator<Item = (usize, char)>>(iter: I) -> Self {
        let mut locked = Self::new();
        for (pos, letter) in iter {
            locked.lock(pos, letter);
        }
        locked
    }
}

/// Positions exposed by the lifeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealedLetters(BTreeSet<usize>);

impl RevealedLetters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the position was not revealed before
    pub(crate) fn insert(&mut self, position: usize) -> bool {
        self.0.insert(position)
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.0.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for RevealedLetters {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
