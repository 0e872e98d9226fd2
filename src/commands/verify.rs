//! Word list verification
//!
//! Checks every embedded dictionary and clue list for duplicates, entries of
//! the wrong length and non-letters, and checks that every scheduled answer
//! is itself an accepted guess.

use crate::core::{MAX_LENGTH, MIN_LENGTH};
use crate::puzzle::{
    Dictionary, EmbeddedPuzzles, WordListReport, check_word_list, clue_entries, dictionary_words,
};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Findings for one word length
#[derive(Debug, Clone)]
pub struct LengthReport {
    pub length: usize,
    pub dictionary: WordListReport,
    pub clues: WordListReport,
    /// Clue words the dictionary would reject as guesses
    pub missing_from_dictionary: Vec<String>,
    /// Days in the schedule before it repeats
    pub schedule_days: usize,
}

impl LengthReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dictionary.is_clean()
            && self.clues.is_clean()
            && self.missing_from_dictionary.is_empty()
            && self.schedule_days > 0
    }
}

/// Results for all word lengths
#[derive(Debug)]
pub struct VerifyReport {
    pub lengths: Vec<LengthReport>,
    pub duration: Duration,
}

impl VerifyReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.lengths.iter().all(LengthReport::is_clean)
    }
}

/// Verify every supported length in parallel
#[must_use]
pub fn run_verify(source: &EmbeddedPuzzles) -> VerifyReport {
    let lengths: Vec<usize> = (MIN_LENGTH..=MAX_LENGTH).collect();
    let start = Instant::now();

    let pb = ProgressBar::new(lengths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );

    let mut reports: Vec<LengthReport> = lengths
        .par_iter()
        .map(|&length| {
            let report = verify_length(source, length);
            pb.set_message(format!("{length} letters checked"));
            pb.inc(1);
            report
        })
        .collect();
    reports.sort_by_key(|r| r.length);

    pb.finish_with_message("Complete!");

    VerifyReport {
        lengths: reports,
        duration: start.elapsed(),
    }
}

fn verify_length(source: &EmbeddedPuzzles, length: usize) -> LengthReport {
    let words = dictionary_words(length).unwrap_or_default();
    let entries = clue_entries(length).unwrap_or_default();
    let clue_words: Vec<&str> = entries.iter().map(|&(word, _)| word).collect();

    let missing_from_dictionary = match Dictionary::from_words(length, words.iter().copied()) {
        Ok(dictionary) => clue_words
            .iter()
            .filter(|w| !dictionary.contains(w))
            .map(|w| w.to_lowercase())
            .collect(),
        Err(_) => clue_words.iter().map(|w| w.to_lowercase()).collect(),
    };

    LengthReport {
        length,
        dictionary: check_word_list(length, words),
        clues: check_word_list(length, &clue_words),
        missing_from_dictionary,
        schedule_days: source.scheduled_words(length).map_or(0, |s| s.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lists_verify_clean() {
        let report = run_verify(&EmbeddedPuzzles::default());
        assert_eq!(report.lengths.len(), 3);
        for length in &report.lengths {
            assert!(length.is_clean(), "{length:?}");
        }
        assert!(report.is_clean());
    }
}
