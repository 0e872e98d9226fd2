//! Puzzle words
//!
//! Every secret, guess and dictionary entry is a `Word`: 5 to 7 ASCII
//! letters, stored lowercase.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Shortest supported word length
pub const MIN_LENGTH: usize = 5;

/// Longest supported word length
pub const MAX_LENGTH: usize = 7;

/// A validated, lowercase puzzle word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be {MIN_LENGTH}-{MAX_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("Word must contain only ASCII letters")]
    NonAscii,
    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

/// Check whether a word length is playable
#[inline]
#[must_use]
pub const fn is_supported_length(length: usize) -> bool {
    length >= MIN_LENGTH && length <= MAX_LENGTH
}

impl Word {
    /// Validate and normalize a word
    ///
    /// Surrounding whitespace is trimmed and letters are lowercased.
    ///
    /// # Errors
    /// Returns `WordError` for non-ASCII text, a length outside 5-7, or
    /// anything other than letters.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::core::Word;
    ///
    /// let word = Word::new("Planet").unwrap();
    /// assert_eq!(word.text(), "planet");
    ///
    /// assert!(Word::new("far too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text = text.into().trim().to_lowercase();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }
        if !is_supported_length(text.len()) {
            return Err(WordError::InvalidLength(text.len()));
        }
        if !text.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text })
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Letters as ASCII bytes
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        self.text.as_bytes()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a constructed word
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Letter at `position`
    ///
    /// # Panics
    /// Panics if `position >= len()`.
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.chars()[position]
    }

    /// Multiset of letters, the pool duplicate-aware scoring draws from
    pub(crate) fn char_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &b in self.chars() {
            *counts.entry(b).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_lengths() {
        assert_eq!(Word::new("crane").unwrap().len(), 5);
        assert_eq!(Word::new("planet").unwrap().len(), 6);
        assert_eq!(Word::new("dolphin").unwrap().len(), 7);
        assert_eq!(Word::new("crane").unwrap().chars(), b"crane");
    }

    #[test]
    fn input_is_normalized() {
        assert_eq!(Word::new(" CrAnE ").unwrap().text(), "crane");
        assert_eq!(Word::new("crane").unwrap(), Word::new("CRANE").unwrap());
    }

    #[test]
    fn bad_lengths_are_rejected() {
        assert_eq!(Word::new("toolonger"), Err(WordError::InvalidLength(9)));
        assert_eq!(Word::new("shrt"), Err(WordError::InvalidLength(4)));
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
    }

    #[test]
    fn non_letters_are_rejected() {
        assert_eq!(Word::new("cran3"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cr ne"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("crané"), Err(WordError::NonAscii));
    }

    #[test]
    fn letter_pool_counts_duplicates() {
        let counts = Word::new("balloon").unwrap().char_counts();
        assert_eq!(counts.get(&b'l'), Some(&2));
        assert_eq!(counts.get(&b'o'), Some(&2));
        assert_eq!(counts.get(&b'b'), Some(&1));
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn displays_as_text() {
        assert_eq!(Word::new("speed").unwrap().to_string(), "speed");
    }
}
