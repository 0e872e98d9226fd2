//! Guess feedback calculation and representation
//!
//! Feedback holds one `LetterStatus` per position:
//! - Absent: letter not in the word (or all its copies already accounted for)
//! - Present: letter in the word, wrong position
//! - Correct: letter in the correct position

use super::{Word, WordError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Status of a single letter, ordered by precedence
///
/// `Correct > Present > Absent`, which is what keyboard aggregation relies on
/// when deciding whether a letter may be upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Absent,
    Present,
    Correct,
}

impl LetterStatus {
    /// Emoji tile for share text and line-mode output
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Error raised when a guess cannot be scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Guess has {guess} letters but the secret has {secret}")]
    LengthMismatch { guess: usize, secret: usize },

    #[error("Cannot score {text:?}: {source}")]
    InvalidWord {
        text: String,
        #[source]
        source: WordError,
    },
}

/// Per-position feedback for one guess
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback(Vec<LetterStatus>);

impl Feedback {
    /// Calculate the feedback when `guess` is played against `secret`
    ///
    /// Handles duplicate letters the standard way: a repeated guessed letter is
    /// only marked present as many times as it remains in the secret after the
    /// exact matches have been removed.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches correct and remove them from the letter pool
    /// 2. Second pass: mark present from whatever the pool still holds, absent otherwise
    ///
    /// # Errors
    /// Returns `FeedbackError::LengthMismatch` if the words differ in length.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::core::{Feedback, LetterStatus, Word};
    ///
    /// let guess = Word::new("slate").unwrap();
    /// let secret = Word::new("crane").unwrap();
    /// let feedback = Feedback::calculate(&guess, &secret).unwrap();
    ///
    /// assert_eq!(feedback.status_at(2), LetterStatus::Correct);
    /// assert_eq!(feedback.status_at(0), LetterStatus::Absent);
    /// ```
    pub fn calculate(guess: &Word, secret: &Word) -> Result<Self, FeedbackError> {
        if guess.len() != secret.len() {
            return Err(FeedbackError::LengthMismatch {
                guess: guess.len(),
                secret: secret.len(),
            });
        }

        let mut result = vec![LetterStatus::Absent; guess.len()];
        let mut pool = secret.char_counts();

        // First pass: exact position matches
        for (i, (&g, &s)) in guess.chars().iter().zip(secret.chars()).enumerate() {
            if g == s {
                result[i] = LetterStatus::Correct;
                if let Some(count) = pool.get_mut(&g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: wrong position, but the letter is still available
        for (i, &g) in guess.chars().iter().enumerate() {
            if result[i] == LetterStatus::Correct {
                continue;
            }
            if let Some(count) = pool.get_mut(&g)
                && *count > 0
            {
                result[i] = LetterStatus::Present;
                *count -= 1;
            }
        }

        Ok(Self(result))
    }

    /// All statuses in position order
    #[inline]
    #[must_use]
    pub fn statuses(&self) -> &[LetterStatus] {
        &self.0
    }

    /// Status at a single position
    ///
    /// # Panics
    /// Panics if position is out of range
    #[inline]
    #[must_use]
    pub fn status_at(&self, position: usize) -> LetterStatus {
        self.0[position]
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every position is correct
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&s| s == LetterStatus::Correct)
    }

    /// Positions marked correct
    pub fn correct_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == LetterStatus::Correct)
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&s| s == LetterStatus::Correct).count()
    }

    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&s| s == LetterStatus::Present).count()
    }

    /// Convert feedback to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|s| s.emoji()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for status in &self.0 {
            let ch = match status {
                LetterStatus::Correct => 'G',
                LetterStatus::Present => 'Y',
                LetterStatus::Absent => '-',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Score a raw guess against a raw secret
///
/// Both sides are case-normalized. Callers are expected to have validated the
/// guess already; this only fails on unusable input.
///
/// # Errors
/// Returns `FeedbackError::LengthMismatch` if the lengths differ, and
/// `FeedbackError::InvalidWord` if either side is not a playable word.
pub fn evaluate(guess: &str, secret: &str) -> Result<Feedback, FeedbackError> {
    let (guess, secret) = (guess.trim(), secret.trim());
    if guess.chars().count() != secret.chars().count() {
        return Err(FeedbackError::LengthMismatch {
            guess: guess.chars().count(),
            secret: secret.chars().count(),
        });
    }
    let word = |text: &str| {
        Word::new(text).map_err(|source| FeedbackError::InvalidWord {
            text: text.to_string(),
            source,
        })
    };
    Feedback::calculate(&word(guess)?, &word(secret)?)
}
