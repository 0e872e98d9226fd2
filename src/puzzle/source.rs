//! Puzzle sources
//!
//! The daily schedule cycles through each length's clue words, shuffled once
//! with a fixed seed, one word per day from the schedule epoch.

use super::embedded::clue_entries;
use super::{Calendar, PuzzleDate, PuzzleError};
use crate::core::{Word, is_supported_length};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

/// First day with a scheduled puzzle
pub const SCHEDULE_EPOCH: (i32, u32, u32) = (2025, 1, 1);

/// Base seed for the schedule shuffle (the word length is added)
const SCHEDULE_SEED: u64 = 42;

/// A loaded puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub word: Word,
    pub clue: Option<String>,
    /// Day the puzzle belongs to
    pub date: PuzzleDate,
    /// True only for today's scheduled puzzle
    pub is_today: bool,
}

/// Supplies puzzles by day or at random
pub trait PuzzleSource {
    /// Today's puzzle, or a random one when `random_mode` is set
    ///
    /// # Errors
    /// Returns `PuzzleError` if no puzzle can be produced.
    fn load_daily(&self, word_length: usize, random_mode: bool) -> Result<Puzzle, PuzzleError>;

    /// The puzzle scheduled for a specific day
    ///
    /// # Errors
    /// Returns `PuzzleError::NoPuzzleAvailable` if nothing is scheduled that day.
    fn load_by_date(&self, date: PuzzleDate, word_length: usize) -> Result<Puzzle, PuzzleError>;
}

/// One entry in a length's schedule
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledWord {
    word: String,
    clue: String,
}

/// Puzzle source backed by the embedded clue lists
#[derive(Debug, Clone)]
pub struct EmbeddedPuzzles {
    calendar: Calendar,
    epoch: PuzzleDate,
    schedules: [Vec<ScheduledWord>; 3],
}

impl EmbeddedPuzzles {
    #[must_use]
    pub fn new(calendar: Calendar) -> Self {
        let (y, m, d) = SCHEDULE_EPOCH;
        let epoch = PuzzleDate::from_ymd(y, m, d).unwrap_or_else(|| calendar.today());
        let schedule = |length: usize| {
            build_schedule(length, clue_entries(length).unwrap_or_default())
        };
        Self {
            calendar,
            epoch,
            schedules: [schedule(5), schedule(6), schedule(7)],
        }
    }

    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    fn schedule(&self, length: usize) -> Result<&[ScheduledWord], PuzzleError> {
        if !is_supported_length(length) {
            return Err(PuzzleError::UnsupportedLength(length));
        }
        let schedule = &self.schedules[length - 5];
        if schedule.is_empty() {
            return Err(PuzzleError::EmptyWordList(length));
        }
        Ok(schedule)
    }

    /// Scheduled words for a length, in schedule order
    ///
    /// # Errors
    /// Returns `PuzzleError` for unsupported lengths.
    pub fn scheduled_words(&self, length: usize) -> Result<Vec<&str>, PuzzleError> {
        Ok(self
            .schedule(length)?
            .iter()
            .map(|s| s.word.as_str())
            .collect())
    }

    fn puzzle_from(&self, entry: &ScheduledWord, date: PuzzleDate) -> Result<Puzzle, PuzzleError> {
        let word = Word::new(&entry.word)
            .map_err(|_| PuzzleError::EmptyWordList(entry.word.len()))?;
        Ok(Puzzle {
            word,
            clue: Some(entry.clue.clone()),
            date,
            is_today: date == self.calendar.today(),
        })
    }
}

impl Default for EmbeddedPuzzles {
    fn default() -> Self {
        Self::new(Calendar::default())
    }
}

impl PuzzleSource for EmbeddedPuzzles {
    fn load_daily(&self, word_length: usize, random_mode: bool) -> Result<Puzzle, PuzzleError> {
        let today = self.calendar.today();
        if !random_mode {
            return self.load_by_date(today, word_length);
        }

        let schedule = self.schedule(word_length)?;
        let entry = schedule
            .choose(&mut rand::rng())
            .ok_or(PuzzleError::EmptyWordList(word_length))?;
        let mut puzzle = self.puzzle_from(entry, today)?;
        puzzle.is_today = false;
        Ok(puzzle)
    }

    fn load_by_date(&self, date: PuzzleDate, word_length: usize) -> Result<Puzzle, PuzzleError> {
        let schedule = self.schedule(word_length)?;
        let days = date.days_since(self.epoch);
        if days < 0 {
            return Err(PuzzleError::NoPuzzleAvailable {
                date,
                length: word_length,
            });
        }
        let index = (days as usize) % schedule.len();
        self.puzzle_from(&schedule[index], date)
    }
}

/// Deduplicate, filter and shuffle a length's clue words
fn build_schedule(length: usize, entries: &[(&str, &str)]) -> Vec<ScheduledWord> {
    let mut seen = FxHashSet::default();
    let mut schedule: Vec<ScheduledWord> = entries
        .iter()
        .map(|(word, clue)| (word.trim().to_lowercase(), clue.trim()))
        .filter(|(word, _)| word.len() == length && word.chars().all(|c| c.is_ascii_lowercase()))
        .filter(|(word, _)| seen.insert(word.clone()))
        .map(|(word, clue)| ScheduledWord {
            word,
            clue: clue.to_string(),
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(SCHEDULE_SEED + length as u64);
    schedule.shuffle(&mut rng);
    schedule
}

/// Hardcoded puzzle used when loading fails
///
/// # Errors
/// Returns `PuzzleError::UnsupportedLength` outside 5-7.
pub fn fallback_puzzle(word_length: usize, date: PuzzleDate) -> Result<Puzzle, PuzzleError> {
    let (word, clue) = match word_length {
        5 => ("crane", "Tall bird or tall machine"),
        6 => ("planet", "World in orbit"),
        7 => ("journey", "Trip from here to there"),
        other => return Err(PuzzleError::UnsupportedLength(other)),
    };
    let word = Word::new(word).map_err(|_| PuzzleError::UnsupportedLength(word_length))?;
    Ok(Puzzle {
        word,
        clue: Some(clue.to_string()),
        date,
        is_today: false,
    })
}
