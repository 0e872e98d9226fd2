//! Daily Wordle
//!
//! A daily word-guessing puzzle: one secret word per day in 5, 6 or 7
//! letters, optional pre-revealed vowels, a one-time lifeline, and progress
//! that survives restarts until the day rolls over.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use daily_wordle::core::evaluate;
//! use daily_wordle::engine::{GameState, GameStatus, LockedLetters};
//! use daily_wordle::core::Word;
//!
//! // Duplicate-aware scoring
//! let feedback = evaluate("erase", "speed").unwrap();
//! println!("{}", feedback.to_emoji());
//!
//! // Play a puzzle against a word list
//! let words: &[&str] = &["slate", "crane"];
//! let mut game = GameState::new(Word::new("crane").unwrap(), None, LockedLetters::new(), 6);
//! game.submit_guess("slate", words).unwrap();
//! game.submit_guess("crane", words).unwrap();
//! assert_eq!(game.status(), GameStatus::Won);
//! ```

// Words and guess evaluation
pub mod core;

// Game rules: locks, reveals, attempts
pub mod engine;

// Puzzle schedule, dictionaries and the daily boundary
pub mod puzzle;

// Day-keyed save and restore
pub mod persistence;

// Finished game records
pub mod stats;

// Player settings and data directory
pub mod config;

// Logger setup
pub mod logging;

// A game wired to its collaborators
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
