//! Core domain types for the puzzle
//!
//! Words and guess feedback. Everything here is pure and deterministic.

mod feedback;
mod word;

pub use feedback::{Feedback, FeedbackError, LetterStatus, evaluate};
pub use word::{MAX_LENGTH, MIN_LENGTH, Word, WordError, is_supported_length};
