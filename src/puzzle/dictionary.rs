//! Guess dictionaries
//!
//! One dictionary per word length, built from the embedded lists.

use super::PuzzleError;
use super::embedded::dictionary_words;
use crate::core::{Word, is_supported_length};
use crate::engine::Lexicon;
use rustc_hash::FxHashSet;

/// Set of valid guesses for one word length
#[derive(Debug, Clone)]
pub struct Dictionary {
    length: usize,
    words: FxHashSet<String>,
}

impl Dictionary {
    /// Build from any list of words, keeping valid words of `length`
    ///
    /// # Errors
    /// Returns `PuzzleError` for an unsupported length or if nothing usable is left.
    pub fn from_words<'a, I>(length: usize, words: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !is_supported_length(length) {
            return Err(PuzzleError::UnsupportedLength(length));
        }

        let words: FxHashSet<String> = words
            .into_iter()
            .filter_map(|w| Word::new(w).ok())
            .filter(|w| w.len() == length)
            .map(|w| w.text().to_string())
            .collect();

        if words.is_empty() {
            return Err(PuzzleError::EmptyWordList(length));
        }

        Ok(Self { length, words })
    }

    /// Load the embedded dictionary for a word length
    ///
    /// # Errors
    /// Returns `PuzzleError::UnsupportedLength` outside 5-7.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::puzzle::Dictionary;
    ///
    /// let dictionary = Dictionary::embedded(5).unwrap();
    /// assert!(dictionary.contains("crane"));
    /// ```
    pub fn embedded(length: usize) -> Result<Self, PuzzleError> {
        let words = dictionary_words(length).ok_or(PuzzleError::UnsupportedLength(length))?;
        Self::from_words(length, words.iter().copied())
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check a word, ignoring case
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_lowercase())
    }
}

impl Lexicon for Dictionary {
    fn contains(&self, word: &str) -> bool {
        Dictionary::contains(self, word)
    }
}

/// Problems found in a raw word list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordListReport {
    pub length: usize,
    pub total: usize,
    pub duplicates: Vec<String>,
    pub wrong_length: Vec<String>,
    pub invalid: Vec<String>,
}

impl WordListReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.wrong_length.is_empty() && self.invalid.is_empty()
    }
}

/// Check a raw list for duplicates, wrong lengths and non-letter entries
#[must_use]
pub fn check_word_list(length: usize, words: &[&str]) -> WordListReport {
    let mut seen = FxHashSet::default();
    let mut report = WordListReport {
        length,
        total: words.len(),
        ..WordListReport::default()
    };

    for &raw in words {
        let word = raw.trim().to_lowercase();
        if !seen.insert(word.clone()) {
            report.duplicates.push(word);
        } else if !word.chars().all(|c| c.is_ascii_lowercase()) {
            report.invalid.push(word);
        } else if word.len() != length {
            report.wrong_length.push(word);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dictionaries_load_for_every_length() {
        for length in 5..=7 {
            let dictionary = Dictionary::embedded(length).unwrap();
            assert_eq!(dictionary.length(), length);
            assert!(!dictionary.is_empty());
        }
    }

    #[test]
    fn unsupported_length_is_rejected() {
        assert!(matches!(
            Dictionary::embedded(4),
            Err(PuzzleError::UnsupportedLength(4))
        ));
    }

    #[test]
    fn from_words_filters_by_length() {
        let dictionary = Dictionary::from_words(5, ["crane", "planet", "SLATE", "sl4te"]).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains("slate"));
        assert!(dictionary.contains("CRANE"));
        assert!(!dictionary.contains("planet"));
    }

    #[test]
    fn from_words_empty_is_an_error() {
        assert!(matches!(
            Dictionary::from_words(6, ["crane"]),
            Err(PuzzleError::EmptyWordList(6))
        ));
    }

    #[test]
    fn check_word_list_reports_problems() {
        let report = check_word_list(5, &["crane", "CRANE", "slat", "sl4te", "slate"]);
        assert_eq!(report.total, 5);
        assert_eq!(report.duplicates, vec!["crane"]);
        assert_eq!(report.wrong_length, vec!["slat"]);
        assert_eq!(report.invalid, vec!["sl4te"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn embedded_lists_are_clean() {
        for length in 5..=7 {
            let words = dictionary_words(length).unwrap();
            let report = check_word_list(length, words);
            assert!(report.is_clean(), "{report:?}");
        }
    }
}
